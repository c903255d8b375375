//! Terminal client for the RSVP API.
//!
//! [`client`] talks HTTP; [`wizard`] holds the two-step form state
//! (create an event, then collect RSVPs) independent of any terminal I/O.

pub mod client;
pub mod wizard;

pub use client::{
    ClientError, ClientResult, EventView, EventsApi, HttpEventsApi, RsvpStatus, RsvpView,
};
pub use wizard::{FormStep, RsvpWizard, Submission, render_event};
