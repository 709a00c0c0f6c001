/// Checks that a numerical value is in the closed interval `[a,b]`, returning early
/// with [`Error::InvalidParameter`](crate::Error::InvalidParameter) if not
///
/// ### Example
/// ```ignore
/// let epsilon = 2.0;
/// check_interval!(epsilon, 0.0, 1.0);
/// ```
/// This returns `Err` with the message "invalid value for \`epsilon\`: 2 (must be in the interval \[0, 1\])".
#[macro_export]
macro_rules! check_interval {
    ($var:expr, $a:expr, $b:expr) => {
        $crate::check_interval!(stringify!($var), $var, $a, $b)
    };
    ($name:expr, $var:expr, $a:expr, $b:expr) => {
        if !($var >= $a && $var <= $b) {
            return Err($crate::Error::InvalidParameter {
                name: $name,
                value: $var,
                min: $a,
                max: $b,
            });
        }
    };
}

/// Index of the greatest value, ties going to the lowest index
///
/// Returns `0` for an empty slice. NaN entries never win.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] || values[best].is_nan() {
            best = i;
        }
    }
    best
}

/// Greatest value in the slice, or `0.0` if empty
pub fn max_value(values: &[f64]) -> f64 {
    values.get(argmax(values)).copied().unwrap_or(0.0)
}
