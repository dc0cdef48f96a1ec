// All logging goes through `fevent!`, which is the only place that depends on `tracing`.
#[cfg(feature = "tracing")]
macro_rules! fevent {
    ($level:ident, $($tt:tt)*) => {
        tracing::event!(target: "feedwindow", tracing::Level::$level, $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! fevent {
    ($level:ident, $($tt:tt)*) => {};
}

macro_rules! ftrace {
    ($($tt:tt)*) => { fevent!(TRACE, $($tt)*) };
}

macro_rules! fdebug {
    ($($tt:tt)*) => { fevent!(DEBUG, $($tt)*) };
}

macro_rules! fwarn {
    ($($tt:tt)*) => { fevent!(WARN, $($tt)*) };
}
