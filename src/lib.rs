//! Telemost meeting gateway: a validated client for the Yandex Telemost
//! conferencing API, a Telegram bot for delivering meeting invitations,
//! and a JSON HTTP API exposing both.

pub mod api;
pub mod cli;
pub mod core;
pub mod telegram;
pub mod telemost;
