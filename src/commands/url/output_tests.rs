//! Output formatting tests for url command.

#[cfg(test)]
mod tests {
    use super::super::execute::UrlResult;
    use rstest::{fixture, rstest};

    const TABLE_OUTPUT: &str = "/data/des/OPS/red/R1/red/E1/E1_03.fits.fz";

    #[fixture]
    fn red_image_result() -> UrlResult {
        UrlResult {
            filetype: "red_image".to_string(),
            fs: "nfs".to_string(),
            schema: "v2beta".to_string(),
            url: "/data/des/OPS/red/R1/red/E1/E1_03.fits.fz".to_string(),
        }
    }

    crate::output_table_test! {
        test_name: test_to_table,
        fixture: red_image_result,
        fixture_type: UrlResult,
        expected: TABLE_OUTPUT,
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: red_image_result,
        fixture_type: UrlResult,
        assertions: {
            "filetype": "red_image",
            "fs": "nfs",
            "url": TABLE_OUTPUT,
        },
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: red_image_result,
        fixture_type: UrlResult,
        contains: ["filetype: red_image", "schema: v2beta"],
    }
}
