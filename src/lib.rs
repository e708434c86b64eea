//! # Cartell - Event Poster Generator
//!
//! Cartell renders promotional posters for "La nit del llop" literary
//! events. A Typeform webhook delivers the event data; the library
//! composites a fixed background, a logo strip, the guest's photograph and
//! eight lines of styled text onto a 1280x800 PNG, shrinking any line that
//! would overflow the content column.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cartell::compose::{self, Assets};
//! use cartell::poster::{Poster, default_venues};
//! use chrono::NaiveDate;
//!
//! let poster = Poster {
//!     title: "La nit del llop".to_string(),
//!     guest: "Jordi Puig".to_string(),
//!     date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
//!     time: "20:00".to_string(),
//!     pic_url: String::new(),
//!     event_type: "Cena".to_string(),
//! };
//!
//! // Renders assets + photograph + text template to cartel.png.
//! compose::render(&poster, "guest.png".as_ref(), &Assets::default(), &default_venues())?;
//! # Ok::<(), cartell::CartellError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`canvas`] | Drawing surface with anchored blits and text |
//! | [`layout`] | Shrink-to-fit text layout engine |
//! | [`thumbnail`] | Aspect-preserving downscaling |
//! | [`compose`] | The poster pipeline |
//! | [`poster`] | Domain record and Catalan formatting |
//! | [`webhook`] | Typeform payload parsing |
//! | [`fetch`] | Photograph download and temp-file lifecycle |
//! | [`fonts`] | Font assets and caching |
//! | [`server`] | HTTP transport |
//! | [`error`] | Error types |

pub mod canvas;
pub mod compose;
pub mod error;
pub mod fetch;
pub mod fonts;
pub mod layout;
pub mod poster;
pub mod server;
pub mod thumbnail;
pub mod webhook;

// Re-exports for convenience
pub use error::CartellError;
pub use poster::Poster;
