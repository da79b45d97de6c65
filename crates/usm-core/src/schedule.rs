// ── Job schedule shorthand ──
//
// The control plane speaks a Quartz-style cron dialect. Users speak
// "hourly" and "daily". Both directions come from one immutable table;
// values outside it pass through untouched.

use std::collections::HashMap;
use std::sync::LazyLock;

const TABLE: &[(&str, &str)] = &[
    ("hourly", "0 2 0/1 1/1 * ? *"),
    ("daily", "0 2 0 1/1 * ? *"),
];

struct ScheduleTable {
    to_cron: HashMap<&'static str, &'static str>,
    to_shorthand: HashMap<&'static str, &'static str>,
}

static SCHEDULES: LazyLock<ScheduleTable> = LazyLock::new(|| ScheduleTable {
    to_cron: TABLE.iter().copied().collect(),
    to_shorthand: TABLE.iter().map(|&(short, cron)| (cron, short)).collect(),
});

/// Translate shorthand to control-plane syntax.
pub fn to_cron(schedule: &str) -> &str {
    SCHEDULES.to_cron.get(schedule).copied().unwrap_or(schedule)
}

/// Translate control-plane syntax back to shorthand where one exists.
pub fn to_shorthand(schedule: &str) -> &str {
    SCHEDULES
        .to_shorthand
        .get(schedule)
        .copied()
        .unwrap_or(schedule)
}

/// Known shorthand names.
pub fn shorthands() -> impl Iterator<Item = &'static str> {
    TABLE.iter().map(|&(short, _)| short)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthand_maps_both_ways() {
        assert_eq!(to_cron("hourly"), "0 2 0/1 1/1 * ? *");
        assert_eq!(to_cron("daily"), "0 2 0 1/1 * ? *");
        assert_eq!(to_shorthand("0 2 0/1 1/1 * ? *"), "hourly");
        assert_eq!(to_shorthand("0 2 0 1/1 * ? *"), "daily");
    }

    #[test]
    fn unknown_values_pass_through() {
        assert_eq!(to_cron("0 0 12 * * ? *"), "0 0 12 * * ? *");
        assert_eq!(to_shorthand("weekly"), "weekly");
    }

    #[test]
    fn every_shorthand_round_trips() {
        for short in shorthands() {
            assert_eq!(to_shorthand(to_cron(short)), short);
        }
    }
}
