use crate::commands::AppContext;
use crate::format::visible_entries;
use console::{Key, Term};
use marklist::browser::{activate, open_url};
use marklist::debounce::Debouncer;
use marklist::error::Result;
use marklist::view::BookmarkView;
use marklist::BookmarkRecord;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// Wait used when no filter is pending
const IDLE_WAIT: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// Only the prompt changed
    Prompt,
    /// Open this URL and leave
    Open(String),
    Quit,
    Ignore,
}

/// Query typed so far plus the list it filters.
///
/// Keystrokes only update the prompt; the list is filtered once typing pauses
/// for the debounce delay.
pub struct SearchSession {
    view: BookmarkView,
    query: String,
    debouncer: Debouncer<String>,
}

impl SearchSession {
    pub fn new(mut view: BookmarkView, initial_query: &str, delay: Duration) -> Self {
        view.apply_filter(initial_query);
        Self {
            view,
            query: initial_query.to_string(),
            debouncer: Debouncer::new(delay),
        }
    }

    pub fn view(&self) -> &BookmarkView {
        &self.view
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn key(&mut self, key: Key, now: Instant) -> SearchAction {
        match key {
            Key::Char(c) if !c.is_control() => {
                self.query.push(c);
                self.debouncer.push(self.query.clone(), now);
                SearchAction::Prompt
            }
            Key::Backspace => {
                if self.query.pop().is_none() {
                    return SearchAction::Ignore;
                }
                self.debouncer.push(self.query.clone(), now);
                SearchAction::Prompt
            }
            Key::Enter => {
                if let Some(query) = self.debouncer.flush() {
                    self.view.apply_filter(&query);
                }
                match self.first_visible() {
                    Some(record) => SearchAction::Open(record.url.clone()),
                    None => SearchAction::Ignore,
                }
            }
            Key::Escape => SearchAction::Quit,
            _ => SearchAction::Ignore,
        }
    }

    /// Apply the pending query once its delay has passed; true when the list changed
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(query) => {
                let visible = self.view.apply_filter(&query);
                log::debug!("Filter '{}' shows {} bookmark(s)", query, visible);
                true
            }
            None => false,
        }
    }

    pub fn wait_time(&self, now: Instant) -> Duration {
        self.debouncer.time_remaining(now).unwrap_or(IDLE_WAIT)
    }

    fn first_visible(&self) -> Option<&BookmarkRecord> {
        self.view.visible().next().map(|(_, record, _)| record)
    }
}

/// Interactive search: type to filter, Enter opens the first match, Esc quits
pub fn run(ctx: &AppContext, view: BookmarkView, initial_query: &str) -> Result<()> {
    let term = Term::stdout();
    let mut session = SearchSession::new(view, initial_query, ctx.config.search_debounce());

    if !term.is_term() {
        // Nothing to read keys from: print the filtered list once
        let entries = visible_entries(session.view(), &ctx.config.date_format, ctx.limit);
        ctx.format.print_entries(&entries, ctx.nc);
        return Ok(());
    }

    let (tx, rx) = mpsc::channel();
    let reader = term.clone();
    thread::spawn(move || {
        while let Ok(key) = reader.read_key() {
            if tx.send(key).is_err() {
                break;
            }
        }
    });

    draw(&term, ctx, &session)?;
    loop {
        match rx.recv_timeout(session.wait_time(Instant::now())) {
            Ok(key) => match session.key(key, Instant::now()) {
                SearchAction::Prompt => draw_prompt(&term, &session)?,
                SearchAction::Open(url) => {
                    term.clear_screen()?;
                    eprintln!("Opening: {}", url);
                    activate(&url, "", open_url)?;
                    break;
                }
                SearchAction::Quit => {
                    term.clear_screen()?;
                    break;
                }
                SearchAction::Ignore => {}
            },
            Err(RecvTimeoutError::Timeout) => {
                if session.tick(Instant::now()) {
                    draw(&term, ctx, &session)?;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    Ok(())
}

fn draw(term: &Term, ctx: &AppContext, session: &SearchSession) -> Result<()> {
    term.clear_screen()?;
    let (rows, _) = term.size();
    // Each entry takes three lines plus a separator
    let fits = usize::from(rows.saturating_sub(2)) / 4;
    let limit = ctx.limit.map_or(fits, |l| l.min(fits)).max(1);

    term.write_line(&format!(
        "{} of {} bookmark(s)",
        session.view().visible_count(),
        session.view().len()
    ))?;
    for entry in visible_entries(session.view(), &ctx.config.date_format, Some(limit)) {
        term.write_line(&ctx.format.render_entry(&entry, ctx.nc))?;
    }
    draw_prompt(term, session)
}

fn draw_prompt(term: &Term, session: &SearchSession) -> Result<()> {
    term.clear_line()?;
    term.write_str(&format!("Search: {}", session.query()))?;
    Ok(())
}
