/// Unwraps Option if Some() else evaluates the fallback expression
#[macro_export]
macro_rules! ward {
    ($opt:expr, $x:expr) => {
        match $opt {
            Some(result) => result,
            None => $x,
        }
    };
}

/// To be used in a loop. Log and continue if error.
#[macro_export]
macro_rules! skip {
    ($x:expr $(,)?) => {
        match $x {
            Ok(result) => result,
            Err(err) => {
                log::error!("{}", err);
                continue;
            }
        }
    };
}
