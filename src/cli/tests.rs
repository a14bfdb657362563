//! Tests for argument parsing and output

use super::*;
use crate::error::Error;
use crate::http::ApiResponse;
use crate::pagination::{Filter, PagingMode};
use crate::types::Region;
use clap::Parser;
use pretty_assertions::assert_eq;
use std::io::Write;

#[test]
fn test_parse_get_defaults() {
    let cli = Cli::try_parse_from(["ethos-client", "get", "persons"]).unwrap();
    assert!(!cli.verbose);
    assert_eq!(cli.format, OutputFormat::Json);
    match cli.command {
        Commands::Get {
            resource,
            api_version,
            mode,
            page_size,
            offset,
            filter,
            ..
        } => {
            assert_eq!(resource, "persons");
            assert_eq!(api_version, "");
            assert_eq!(mode, PagingMode::AllPages);
            assert_eq!(page_size, 0);
            assert_eq!(offset, 0);
            assert_eq!(filter.to_filter().unwrap(), Filter::None);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_get_with_mode_and_bounds() {
    let cli = Cli::try_parse_from([
        "ethos-client",
        "--region",
        "canada",
        "get",
        "courses",
        "--version",
        "16",
        "--mode",
        "from-offset-for-num-rows",
        "--page-size",
        "-1",
        "--offset",
        "40",
        "--num-rows",
        "75",
    ])
    .unwrap();

    assert_eq!(cli.region, Some(Region::Canada));
    match cli.command {
        Commands::Get {
            api_version,
            mode,
            page_size,
            offset,
            num_rows,
            ..
        } => {
            assert_eq!(api_version, "16");
            assert_eq!(mode, PagingMode::FromOffsetForNumRows);
            assert_eq!(page_size, -1);
            assert_eq!(offset, 40);
            assert_eq!(num_rows, 75);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_rejects_unknown_mode() {
    assert!(Cli::try_parse_from(["ethos-client", "get", "persons", "--mode", "sideways"]).is_err());
}

#[test]
fn test_filters_are_exclusive() {
    let result = Cli::try_parse_from([
        "ethos-client",
        "get",
        "persons",
        "--criteria",
        "{}",
        "--filter",
        "a=b",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_errors_id_conflicts_with_paging() {
    assert!(Cli::try_parse_from(["ethos-client", "errors", "--id", "e1", "--limit", "5"]).is_err());
    assert!(Cli::try_parse_from(["ethos-client", "errors", "--id", "e1"]).is_ok());
}

#[test]
fn test_filter_args_criteria() {
    let args = FilterArgs {
        criteria: Some(r#"{ "code": "MATH" }"#.to_string()),
        ..Default::default()
    };
    assert_eq!(
        args.to_filter().unwrap(),
        Filter::Criteria(r#"{"code":"MATH"}"#.to_string())
    );
}

#[test]
fn test_filter_args_named_query() {
    let args = FilterArgs {
        named_query: Some(r#"keywordSearch={"keywordSearch":"smith"}"#.to_string()),
        ..Default::default()
    };
    assert_eq!(
        args.to_filter().unwrap(),
        Filter::NamedQuery("keywordSearch=%7B%22keywordSearch%22%3A%22smith%22%7D".to_string())
    );
}

#[test]
fn test_filter_args_filter_map_and_qapi() {
    let args = FilterArgs {
        filter: Some("code=MATH, status=active".to_string()),
        ..Default::default()
    };
    assert_eq!(
        args.to_filter().unwrap(),
        Filter::FilterMap("code=MATH&status=active".to_string())
    );

    let args = FilterArgs {
        qapi: Some(r#"{"names":[]}"#.to_string()),
        ..Default::default()
    };
    assert_eq!(
        args.to_filter().unwrap(),
        Filter::QapiBody(r#"{"names":[]}"#.to_string())
    );
}

#[test]
fn test_filter_args_rejects_bad_json() {
    for args in [
        FilterArgs {
            criteria: Some("{not json".to_string()),
            ..Default::default()
        },
        FilterArgs {
            criteria: Some("[1, 2]".to_string()),
            ..Default::default()
        },
        FilterArgs {
            named_query: Some("no-equals-sign".to_string()),
            ..Default::default()
        },
        FilterArgs {
            named_query: Some(r#"={"a":1}"#.to_string()),
            ..Default::default()
        },
    ] {
        assert!(matches!(
            args.to_filter().unwrap_err(),
            Error::InvalidArgument { .. }
        ));
    }
}

#[test]
fn test_emit_pages_writes_json_lines() {
    let cli = Cli::try_parse_from(["ethos-client", "resources"]).unwrap();
    let runner = Runner::new(cli);
    let pages = vec![
        ApiResponse::new(200, r#"[{"id":1},{"id":2}]"#),
        ApiResponse::new(200, r#"[{"id":3}]"#),
    ];

    let mut out = Vec::new();
    let count = runner.emit_pages(&mut out, &pages).unwrap();
    out.flush().unwrap();

    assert_eq!(count, 3);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\"id\":1}\n{\"id\":2}\n{\"id\":3}\n"
    );
}

#[test]
fn test_load_config_from_file_with_region_override() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "api_key: test-key\nregion: us").unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let cli =
        Cli::try_parse_from(["ethos-client", "--config", &path, "--region", "eu", "appconfig"])
            .unwrap();
    let config = Runner::new(cli).load_config().unwrap();

    assert_eq!(config.api_key.as_deref(), Some("test-key"));
    assert_eq!(config.region, Region::Europe);
    assert_eq!(
        config.effective_base_url(),
        "https://integrate.elluciancloud.ie"
    );
}
