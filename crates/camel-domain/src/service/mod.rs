//! Domain services

pub mod alarm;
pub mod search;
pub mod weight_calculator;

pub use alarm::{is_out_of_range, AlarmEvaluator, AlarmSignal, ALARM_MESSAGE};
pub use search::{filter_entries, find_case_insensitive, project_rows, HighlightedText, LedgerRow};
pub use weight_calculator::{
    format_grouped, format_number, net_from_input, parse_weight, recompute_net, recompute_price,
};
