//! Drive a modal and a select from a real terminal.
//!
//! Tab / Shift+Tab move focus, Enter and Space activate, arrows and Escape
//! work as in a browser. Press Ctrl+Q to quit. Logs go to `terminal.log`.

use std::cell::{Cell, RefCell};
use std::fs::File;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use compound::prelude::*;
use crossterm::event::{self as ct, Event as CtEvent, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use hdom::event::from_key_event;
use hdom::{Content, ListenerKind, ListenerTarget, OwnerId, BODY_ID};
use simplelog::{Config, LevelFilter, WriteLogger};

/// The page around the components: reacts to the "open" button.
struct Page {
    owner: OwnerId,
    open_requested: Rc<Cell<bool>>,
}

impl Component for Page {
    fn owner(&self) -> OwnerId {
        self.owner
    }

    fn handle_event(&mut self, _doc: &mut Document, _cx: &mut EventContext) -> compound::error::Result<()> {
        self.open_requested.set(true);
        Ok(())
    }
}

fn main() -> io::Result<()> {
    let log_file = File::create("terminal.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let result = run(&mut stdout);

    execute!(stdout, cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(out: &mut impl Write) -> io::Result<()> {
    let mut runtime = Runtime::new();
    let open_requested = Rc::new(Cell::new(false));
    let close_requested = Rc::new(Cell::new(false));
    let picked: Rc<RefCell<Option<Option<String>>>> = Rc::default();

    let doc = runtime.document_mut();
    doc.mount(BODY_ID, Element::div().id("page")).map_err(io::Error::other)?;
    doc.mount("page", Element::button().id("open").text_content("Open dialog"))
        .map_err(io::Error::other)?;

    let page = Page {
        owner: OwnerId::next(),
        open_requested: open_requested.clone(),
    };
    let owner = runtime.register(Rc::new(RefCell::new(page)));
    runtime.document_mut().listeners.add(
        ListenerTarget::Element("open".into()),
        ListenerKind::Click,
        owner,
    );

    let sink = picked.clone();
    let select = Select::builder()
        .label(SelectLabel::new("Fruit"))
        .trigger(SelectTrigger::new().placeholder("Pick a fruit"))
        .list(
            SelectList::new()
                .group(
                    SelectGroup::new("Orchard")
                        .option(SelectOption::new("apple", "Apple"))
                        .option(SelectOption::new("pear", "Pear")),
                )
                .group(
                    SelectGroup::new("Tropical")
                        .option(SelectOption::new("banana", "Banana").disabled(true))
                        .option(SelectOption::new("mango", "Mango"))
                        .option(SelectOption::new("papaya", "Papaya")),
                ),
        )
        .config(SelectConfig::new().list_max_height(4))
        .on_change(move |value| *sink.borrow_mut() = Some(value))
        .mount(&mut runtime, "page")
        .map_err(io::Error::other)?;

    let signal = close_requested.clone();
    let modal = Modal::builder()
        .on_close(move || signal.set(true))
        .content(
            ModalContent::new()
                .part(ModalHeader::new("Discard changes?"))
                .part(ModalBody::text("Unsaved edits will be lost."))
                .part(
                    ModalFooter::new()
                        .child(Element::button().id("keep").text_content("Keep editing"))
                        .child(Element::button().id("discard").text_content("Discard")),
                )
                .part(ModalCloseButton::new()),
        )
        .build(&mut runtime)
        .map_err(io::Error::other)?;

    runtime.document_mut().focus("open");
    let mut last = Instant::now();

    loop {
        draw(out, runtime.document())?;

        if ct::poll(Duration::from_millis(16))? {
            if let CtEvent::Key(key) = ct::read()? {
                if key.kind == KeyEventKind::Press
                    && key.code == KeyCode::Char('q')
                    && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Ok(());
                }
                if let Some(event) = from_key_event(&key) {
                    runtime.dispatch(event).map_err(io::Error::other)?;
                }
            }
        }

        // Apply what the components reported back
        if open_requested.replace(false) {
            modal.open(&mut runtime).map_err(io::Error::other)?;
        }
        if close_requested.replace(false) {
            modal.close(&mut runtime).map_err(io::Error::other)?;
        }
        if let Some(value) = picked.borrow_mut().take() {
            log::info!("picked {:?}", value);
            select.set_value(&mut runtime, value).map_err(io::Error::other)?;
        }

        let now = Instant::now();
        runtime.advance(now - last).map_err(io::Error::other)?;
        last = now;
    }
}

fn draw(out: &mut impl Write, doc: &Document) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    queue!(
        out,
        Print("Tab/Shift+Tab focus, Enter/Space activate, arrows navigate, Esc closes, Ctrl+Q quits\r\n"),
        Print(format!(
            "body overflow: {:?}   scroll lock holders: {}\r\n\r\n",
            doc.body_overflow(),
            doc.scroll_lock_holders()
        ))
    )?;
    for child in doc.body().child_elements() {
        draw_element(out, doc, child, 0)?;
    }
    out.flush()
}

fn draw_element(out: &mut impl Write, doc: &Document, element: &Element, depth: usize) -> io::Result<()> {
    const SHOWN: [&str; 6] = [
        "role",
        "aria-expanded",
        "aria-selected",
        "aria-disabled",
        "data-state",
        "data-highlighted",
    ];

    let focus = if doc.active_element() == Some(element.id.as_str()) {
        "▶ "
    } else {
        "  "
    };
    let attrs: Vec<String> = SHOWN
        .iter()
        .filter_map(|name| element.get_attr(name).map(|v| format!("{name}={v}")))
        .collect();
    let text = match &element.content {
        Content::Text(text) => format!(" \"{text}\""),
        _ => String::new(),
    };
    queue!(
        out,
        Print(format!(
            "{focus}{:indent$}{:?} #{}{} {}\r\n",
            "",
            element.tag,
            element.id,
            text,
            attrs.join(" "),
            indent = depth * 2
        ))
    )?;

    for child in element.child_elements() {
        draw_element(out, doc, child, depth + 1)?;
    }
    Ok(())
}
