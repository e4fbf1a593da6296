//! 핵심 계산 로직을 라이브러리로 분리하여 CLI 뿐 아니라 다른 화면에서도 그대로 쓸 수 있게 한다.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod i18n;
pub mod load;
pub mod logger;
pub mod report;
pub mod room;
pub mod selector;
pub mod session;
pub mod ui_cli;
