//! End-to-end tests for the OBD rig live in `tests/`; this crate carries no
//! library code of its own.
