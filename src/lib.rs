//! Songbook: a small lyrics notebook.
//!
//! Songs (a title and free-form lyrics) live in one SQLite table and are served
//! as JSON under `/api/v1/songs`. The browser UI in `static/` lists songs on the
//! left and autosaves the editor on the right through the same API.
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | GET | /api/v1/songs | 200 | |
//! | GET | /api/v1/songs/{id} | 200 | 404 |
//! | POST | /api/v1/songs | 201 | 400 |
//! | PUT | /api/v1/songs/{id} | 200 | 400, 404 |
//! | DELETE | /api/v1/songs/{id} | 204 | 404 |
//!
//! Errors are returned as `{"error": "..."}`.

pub mod config;
pub mod controllers;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod routers;
pub mod state;
