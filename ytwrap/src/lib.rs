//! `ytw` command-line front-end for [`ytwrap_dl`].

pub mod cli;
pub mod config;
pub mod dl;
