//! Built-in trigger functions

use super::definition::{FunctionDef, Metric, MetricUnit, ParamDef};
use crate::types::ValueType;

const NUMERIC: &[ValueType] = &[ValueType::Float, ValueType::Unsigned];
const TEXTUAL: &[ValueType] = &[ValueType::Str, ValueType::Log, ValueType::Text];
const LOG: &[ValueType] = &[ValueType::Log];

fn last_of() -> ParamDef {
    ParamDef::int("Last of (T)").with_metric(Metric::time_or_counts())
}

fn time_shift() -> ParamDef {
    ParamDef::int("Time shift")
}

/// `func(T[,shift])` over a numeric period, T required
fn period_function(name: &str, description: &str) -> FunctionDef {
    FunctionDef::new(name, description)
        .param(last_of().mandatory())
        .param(time_shift())
        .allowed_types(NUMERIC)
}

/// `func(pattern[,T])` over text values
fn pattern_function(name: &str, description: &str) -> FunctionDef {
    FunctionDef::new(name, description)
        .param(ParamDef::string("Expression").mandatory())
        .param(last_of())
        .allowed_types(TEXTUAL)
}

/// Functions without parameters that read the server clock
fn clock_function(name: &str, description: &str) -> FunctionDef {
    FunctionDef::new(name, description)
}

pub(super) fn definitions() -> Vec<FunctionDef> {
    vec![
        FunctionDef::new("last", "Last (most recent) T value")
            .param(last_of().zero_allowed())
            .param(time_shift()),
        FunctionDef::new("prev", "Previous value"),
        period_function("min", "Minimum value for period of time T"),
        period_function("max", "Maximum value for period of time T"),
        period_function("avg", "Average value for period of time T"),
        period_function("sum", "Sum of values for period of time T"),
        period_function(
            "delta",
            "Difference between MAX and MIN value of T seconds",
        ),
        FunctionDef::new("count", "Number of successfully retrieved values V for period of time T")
            .param(last_of().mandatory())
            .param(ParamDef::string("V"))
            .param(ParamDef::string("O"))
            .param(time_shift()),
        FunctionDef::new("change", "Difference between last and previous value"),
        FunctionDef::new("abschange", "Absolute difference between last and previous value"),
        FunctionDef::new("diff", "Difference between last and preceding values"),
        FunctionDef::new("nodata", "No data received during period of time T")
            .param(
                ParamDef::int("Last of (T)")
                    .with_metric(Metric::Single(MetricUnit::Time))
                    .mandatory(),
            ),
        pattern_function("regexp", "Regular expression V matching last value in period T"),
        pattern_function(
            "iregexp",
            "Regular expression V matching last value in period T, case insensitive",
        ),
        pattern_function("str", "Find string V in last value in period T"),
        FunctionDef::new("strlen", "Length of last (most recent) T value in characters")
            .param(last_of())
            .param(time_shift())
            .allowed_types(TEXTUAL),
        FunctionDef::new("logseverity", "Log severity of the last log entry").allowed_types(LOG),
        FunctionDef::new("logsource", "Log source of the last log entry matching parameter V")
            .param(ParamDef::string("V").mandatory())
            .allowed_types(LOG),
        FunctionDef::new("logeventid", "Event ID of the last log entry matching regular expression V")
            .param(ParamDef::string("V").mandatory())
            .allowed_types(LOG),
        FunctionDef::new("band", "Bitwise AND of last (most recent) T value and mask")
            .param(last_of().zero_allowed())
            .param(ParamDef::float("Mask").mandatory())
            .param(time_shift())
            .allowed_types(&[ValueType::Unsigned]),
        FunctionDef::new("fuzzytime", "Difference between item timestamp and server time is over T seconds")
            .param(ParamDef::int("T").with_metric(Metric::Single(MetricUnit::Time)).mandatory())
            .allowed_types(NUMERIC),
        clock_function("now", "Number of seconds since the Epoch"),
        clock_function("time", "Current time is N. Format HHMMSS"),
        clock_function("date", "Current date is N. Format YYYYMMDD"),
        clock_function("dayofweek", "Day of week is N. Week begins with Monday"),
        clock_function("dayofmonth", "Day of month is N"),
    ]
}
