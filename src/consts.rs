/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Maximum day number across all months
pub const MAX_DAY: u8 = 31;

/// Maximum valid hour of day
pub const MAX_HOUR: u8 = 23;

/// Maximum valid minute
pub const MAX_MINUTE: u8 = 59;

/// Maximum valid second
pub const MAX_SECOND: u8 = 59;

/// Maximum valid millisecond
pub const MAX_MILLISECOND: u16 = 999;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Pattern token bound to the four-digit year
pub const TOKEN_YEAR: &str = "yyyy";
/// Pattern token bound to the two-digit month
pub const TOKEN_MONTH: &str = "MM";
/// Pattern token bound to the two-digit day
pub const TOKEN_DAY: &str = "dd";
/// Pattern token bound to the two-digit hour
pub const TOKEN_HOUR: &str = "hh";
/// Pattern token bound to the two-digit minute
pub const TOKEN_MINUTE: &str = "mm";
/// Pattern token bound to the two-digit second
pub const TOKEN_SECOND: &str = "ss";
