// Diagnostics front-end. Events go to `tracing` under the crate target when the
// feature is on; otherwise the format arguments are type-checked and dropped.
// Key material must never be passed to these macros.

macro_rules! emit {
    ($level:ident, $($arg:tt)+) => {{
        #[cfg(feature = "tracing")]
        tracing::$level!(target: "wvcdm", $($arg)+);
        #[cfg(not(feature = "tracing"))]
        if false {
            let _ = format_args!($($arg)+);
        };
    }};
}

macro_rules! trace {
    ($($arg:tt)+) => { emit!(trace, $($arg)+) };
}

macro_rules! debug {
    ($($arg:tt)+) => { emit!(debug, $($arg)+) };
}

macro_rules! info {
    ($($arg:tt)+) => { emit!(info, $($arg)+) };
}

macro_rules! warn {
    ($($arg:tt)+) => { emit!(warn, $($arg)+) };
}

#[allow(unused_macros)]
macro_rules! error {
    ($($arg:tt)+) => { emit!(error, $($arg)+) };
}

#[cfg(test)]
mod tests {
    #[test]
    fn every_level_accepts_format_arguments() {
        let keys = 2;
        trace!("trace {}", keys);
        debug!("debug {}", keys);
        info!("info {keys}");
        warn!("warn {}", keys);
        error!("error {}", keys);
    }
}
