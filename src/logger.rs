//! stderr 로깅 초기화. 표준 출력은 계산 결과 전용으로 남겨둔다.

use std::io::stderr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use fern::Dispatch;
use humantime::format_rfc3339_seconds;
use log::{debug, LevelFilter};

/// 두 번째 호출부터는 아무것도 하지 않는다.
static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

/// 설정 문자열을 로그 레벨로 바꾼다. 알 수 없으면 Warn.
pub fn parse_level(s: &str) -> LevelFilter {
    s.trim().parse().unwrap_or(LevelFilter::Warn)
}

/// `-v` 횟수만큼 레벨을 올린다.
pub fn raise_level(base: LevelFilter, verbose: u8) -> LevelFilter {
    let levels = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];
    let idx = levels.iter().position(|l| *l == base).unwrap_or(2);
    levels[(idx + verbose as usize).min(levels.len() - 1)]
}

/// 로거를 초기화한다. 여러 번 호출해도 안전하다.
pub fn initialize(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let colors = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    Dispatch::new()
        .level(level)
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} {level} {target}] {message}",
                date = format_rfc3339_seconds(SystemTime::now()),
                level = colors.color(record.level()),
                target = record.target(),
                message = message,
            ))
        })
        .chain(stderr())
        .apply()?;

    debug!("logger initialized with level {level:?}");
    Ok(())
}
