//! CLI parsing tests for types command using the test DSL.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use clap::Parser;
    use rstest::rstest;

    crate::cli_defaults_test! {
        command: "types",
        variant: Types,
        required_args: [],
        defaults: {
            filter: None,
        },
    }

    crate::cli_option_test! {
        command: "types",
        variant: Types,
        test_name: test_with_filter,
        args: ["--filter", "meds"],
        field: filter,
        expected: Some("meds".to_string()),
    }

    crate::cli_option_test! {
        command: "types",
        variant: Types,
        test_name: test_with_short_filter,
        args: ["-f", "wlpipe"],
        field: filter,
        expected: Some("wlpipe".to_string()),
    }
}
