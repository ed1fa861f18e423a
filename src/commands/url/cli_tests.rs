//! CLI parsing tests for url command using the test DSL.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use clap::Parser;
    use rstest::rstest;

    crate::cli_required_arg_test! {
        command: "url",
        test_name: test_requires_filetype,
        required_arg: "<FILETYPE>",
    }

    crate::cli_option_test! {
        command: "url",
        variant: Url,
        test_name: test_with_filetype,
        args: ["red_image"],
        field: filetype,
        expected: "red_image",
    }

    crate::cli_option_test! {
        command: "url",
        variant: Url,
        test_name: test_with_params,
        args: ["red_image", "-p", "run=R1", "--param", "ccd=3"],
        field: params,
        expected: vec!["run=R1".to_string(), "ccd=3".to_string()],
    }

    crate::cli_defaults_test! {
        command: "url",
        variant: Url,
        required_args: ["coadd_run"],
        defaults: {
            params: Vec::<String>::new(),
        },
    }
}
