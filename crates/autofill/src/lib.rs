//! Autofill - heuristic form filling
//!
//! Maps semantic profile fields (`firstName`, `email`, ...) onto the
//! controls of an arbitrary page through a cascade of matching
//! strategies, then writes values so page frameworks see the change.
//! Pages are reached through the [`Dom`] trait; [`Document`] is an
//! in-memory implementation loadable from JSON snapshots.

pub mod date;
pub mod dom;
pub mod error;
pub mod fill;
pub mod patterns;
pub mod resolver;
pub mod sections;

pub use date::format_date_for_input;
pub use dom::{Document, Dom, DomEvent, Element, Mutation, NodeId, SnapshotNode};
pub use error::{DomError, Result};
pub use fill::{fill, FieldFill, FillReport};
pub use patterns::{FieldDescriptor, PatternTable};
pub use resolver::{is_eligible, resolve, write_value, Match, Strategy};
pub use sections::{find_sections, SectionRule, EDUCATION_SECTIONS, EXPERIENCE_SECTIONS};
