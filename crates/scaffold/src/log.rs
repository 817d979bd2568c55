//! logging stubs for consistent progress and task presentation
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;
use tracing_indicatif::style::ProgressStyle;

/// Set up the given span to be styled as a top-level task
pub(crate) fn set_task(span: &Span, msg: &str) {
    span.pb_set_style(
        &ProgressStyle::with_template("{spinner:.green} {msg}: running for [{elapsed}]")
            .unwrap_or(ProgressStyle::default_spinner()),
    );
    span.pb_set_message(msg);
}

/// Set up the given span to be styled as a subtask of another span
pub(crate) fn set_sub_task(span: &Span, msg: &str) {
    span.pb_set_style(
        &ProgressStyle::with_template("  {span_child_prefix} {spinner:.yellow} {wide_msg}")
            .unwrap_or(ProgressStyle::default_spinner()),
    );
    span.pb_set_message(msg);
}
