//! Two-step RSVP form: create an event, then collect responses for it.

use std::fmt::Write as _;

use tracing::warn;

use crate::client::{ClientResult, EventView, EventsApi, RsvpStatus};

/// What happened to a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Blank input or wrong step; nothing was sent
    Skipped,
    /// A request for this step is still outstanding
    Busy,
    Failed,
    Done,
}

/// Per-step request state: one busy flag and the last error only.
#[derive(Debug, Default)]
pub struct FormStep {
    busy: bool,
    last_error: Option<String>,
}

impl FormStep {
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start a request. Returns `false` if one is already outstanding.
    ///
    /// Clears the previous error.
    pub fn begin(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        self.last_error = None;
        true
    }

    /// End the request, keeping its error message if it failed.
    pub fn finish<T>(&mut self, result: ClientResult<T>) -> Option<T> {
        self.busy = false;
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, "Request failed");
                self.last_error = Some(e.to_string());
                None
            }
        }
    }
}

/// The form's state across both steps
pub struct RsvpWizard<A: EventsApi> {
    api: A,
    event: Option<EventView>,
    create_step: FormStep,
    rsvp_step: FormStep,
}

impl<A: EventsApi> RsvpWizard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            event: None,
            create_step: FormStep::default(),
            rsvp_step: FormStep::default(),
        }
    }

    /// 1 while there is no event yet, 2 once one is held
    pub fn step(&self) -> u8 {
        if self.event.is_some() { 2 } else { 1 }
    }

    pub fn event(&self) -> Option<&EventView> {
        self.event.as_ref()
    }

    pub fn create_step(&self) -> &FormStep {
        &self.create_step
    }

    pub fn rsvp_step(&self) -> &FormStep {
        &self.rsvp_step
    }

    /// The error of the step currently shown
    pub fn last_error(&self) -> Option<&str> {
        match self.step() {
            1 => self.create_step.last_error(),
            _ => self.rsvp_step.last_error(),
        }
    }

    /// Step 1: create the event and move on to step 2.
    pub async fn create_event(&mut self, title: &str, date: &str) -> Submission {
        if self.event.is_some() || title.is_empty() || date.is_empty() {
            return Submission::Skipped;
        }
        if !self.create_step.begin() {
            return Submission::Busy;
        }

        let result = self.api.create_event(title, date).await;
        match self.create_step.finish(result) {
            Some(event) => {
                self.event = Some(event);
                Submission::Done
            }
            None => Submission::Failed,
        }
    }

    /// Jump straight to step 2 for an event created elsewhere.
    pub async fn open_event(&mut self, id: &str) -> Submission {
        if id.is_empty() {
            return Submission::Skipped;
        }
        if !self.create_step.begin() {
            return Submission::Busy;
        }

        let result = self.api.get_event(id).await;
        match self.create_step.finish(result) {
            Some(event) => {
                self.event = Some(event);
                Submission::Done
            }
            None => Submission::Failed,
        }
    }

    /// Step 2: append an RSVP and replace the held event with the returned one.
    pub async fn add_rsvp(&mut self, name: &str, status: RsvpStatus) -> Submission {
        let Some(id) = self.event.as_ref().map(|e| e.id.clone()) else {
            return Submission::Skipped;
        };
        if name.is_empty() {
            return Submission::Skipped;
        }
        if !self.rsvp_step.begin() {
            return Submission::Busy;
        }

        let result = self.api.add_rsvp(&id, name, status).await;
        match self.rsvp_step.finish(result) {
            Some(event) => {
                self.event = Some(event);
                Submission::Done
            }
            None => Submission::Failed,
        }
    }
}

/// Full text rendering of an event and its responses
pub fn render_event(event: &EventView) -> String {
    let count = |status: RsvpStatus| event.rsvps.iter().filter(|r| r.status == status).count();

    let mut out = String::new();
    let _ = writeln!(out, "Title: {}", event.title);
    let _ = writeln!(out, "Date:  {}", event.date);
    let _ = writeln!(out, "Share: {}", event.id);
    let _ = writeln!(
        out,
        "RSVPs: {} yes, {} no, {} maybe",
        count(RsvpStatus::Yes),
        count(RsvpStatus::No),
        count(RsvpStatus::Maybe)
    );

    if event.rsvps.is_empty() {
        out.push_str("  No RSVPs yet.\n");
    }
    for rsvp in &event.rsvps {
        let _ = writeln!(out, "  - {} ({})", rsvp.name, rsvp.status);
    }
    out
}
