#[macro_export]
macro_rules! sin_deg {
    ($x: expr) => {
        $x.to_radians().sin()
    };
}

#[macro_export]
macro_rules! cos_deg {
    ($x: expr) => {
        $x.to_radians().cos()
    };
}

/// Half-open range check, lower bound inclusive.
#[macro_export]
macro_rules! in_range_open {
    ($lb: expr, $ub: expr, $val: expr) => {
        $val >= $lb && $val < $ub
    };
}

#[macro_export]
macro_rules! in_range {
    ($lb: expr, $ub: expr, $val: expr) => {
        $val >= $lb && $val <= $ub
    };
}
