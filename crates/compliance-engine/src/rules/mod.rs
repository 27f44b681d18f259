//! Clause checks, one module per concern
//!
//! `structure` and `language` produce issues; `requirements` and
//! `regulatory` produce compliance gaps.

pub mod language;
pub mod regulatory;
pub mod requirements;
pub mod structure;
