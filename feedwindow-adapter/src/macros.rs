#[cfg(feature = "tracing")]
macro_rules! aevent {
    ($level:ident, $($tt:tt)*) => {
        tracing::event!(target: "feedwindow_adapter", tracing::Level::$level, $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! aevent {
    ($level:ident, $($tt:tt)*) => {};
}

macro_rules! atrace {
    ($($tt:tt)*) => { aevent!(TRACE, $($tt)*) };
}

macro_rules! awarn {
    ($($tt:tt)*) => { aevent!(WARN, $($tt)*) };
}
