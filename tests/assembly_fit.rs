//! Fitting assemblies against a mocked H2O server

mod helpers;

use h2o_assembly::client::{ApiRequest, ClientError, Method};
use h2o_assembly::core::config::AssemblyConfig;
use h2o_assembly::{Assembly, AssemblyError, ColOp, ColSelect, PojoOptions, Step};
use helpers::*;

fn iris_assembly() -> Assembly {
    Assembly::new(vec![
        Step::new("col_select", ColSelect::new(["sepal_len", "petal_len", "class"])),
        Step::new("cos_sep_len", ColOp::new("cos", "sepal_len").inplace(true)),
        Step::new(
            "str_cnt_species",
            ColOp::new("countmatches", "class").arg("s"),
        ),
    ])
}

#[tokio::test]
async fn test_fit_posts_steps_and_stores_assembly_id() {
    let (conn, log) = mock_connection(vec![
        MockReply::json(assembly_json("assembly_7f3a", "assembly_result_1")),
        MockReply::json(frame_json(
            "assembly_result_1",
            150,
            &["sepal_len", "petal_len", "class", "class0"],
        )),
    ]);
    let input = local_frame("iris.hex", &IRIS_COLUMNS);
    let mut assembly = iris_assembly();

    let result = assembly.fit(&conn, &input).await.unwrap();

    assert_eq!(assembly.id(), Some("assembly_7f3a"));
    assert_eq!(result.frame_id, "assembly_result_1");
    assert_eq!(result.rows, 150);
    assert_eq!(assembly.in_colnames.as_deref(), Some(&input.columns[..]));
    assert_eq!(
        assembly.out_colnames,
        Some(vec![
            "sepal_len".to_string(),
            "petal_len".to_string(),
            "class".to_string(),
            "class0".to_string(),
        ])
    );

    let sent = requests(&log);
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].path, "/99/Assembly");
    assert_eq!(sent[0].param_value("frame"), Some("iris.hex"));
    assert_eq!(
        sent[0].param_value("steps"),
        Some(concat!(
            r#"["col_select__H2OColSelect__(cols_py dummy ['sepal_len' 'petal_len' 'class'])__False__|","#,
            r#""cos_sep_len__H2OColOp__(cos (cols_py dummy 'sepal_len'))__True__|","#,
            r#""str_cnt_species__H2OColOp__(countmatches (cols_py dummy 'class') 's')__False__|"]"#,
        ))
    );
    assert_eq!(sent[1].method, Method::Get);
    assert_eq!(sent[1].path, "/3/Frames/assembly_result_1");
}

#[tokio::test]
async fn test_fit_steps_payload_is_a_json_array_of_strings() {
    let assembly = iris_assembly();
    let parsed: Vec<String> = serde_json::from_str(&assembly.steps_payload()).unwrap();

    assert_eq!(parsed.len(), 3);
    assert!(parsed.iter().all(|step| !step.contains('"')));
    assert!(parsed[0].starts_with("col_select__H2OColSelect__"));
}

#[tokio::test]
async fn test_fit_server_error_leaves_assembly_unfitted() {
    let (conn, log) = mock_connection(vec![MockReply::error(
        412,
        serde_json::json!({
            "http_status": 412,
            "msg": "Illegal argument",
            "exception_msg": "Column 'sepal_len' not found",
        }),
    )]);
    let mut assembly = iris_assembly();

    let err = assembly
        .fit(&conn, &local_frame("iris.hex", &["a", "b"]))
        .await
        .unwrap_err();

    match err {
        AssemblyError::Client(ClientError::Server { status, message, .. }) => {
            assert_eq!(status, 412);
            assert!(message.contains("sepal_len"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(assembly.id(), None);
    assert!(assembly.out_colnames.is_none());
    assert_eq!(requests(&log).len(), 1, "no retry after a failure");
}

#[tokio::test]
async fn test_fit_malformed_response_is_decode_error() {
    let (conn, _log) = mock_connection(vec![MockReply::json(serde_json::json!({ "assembly": {} }))]);
    let mut assembly = iris_assembly();

    let err = assembly
        .fit(&conn, &local_frame("iris.hex", &IRIS_COLUMNS))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AssemblyError::Client(ClientError::Decode { .. })
    ));
    assert_eq!(assembly.id(), None);
}

#[tokio::test]
async fn test_fit_missing_result_frame_keeps_assembly_id() {
    let (conn, _log) = mock_connection(vec![
        MockReply::json(assembly_json("assembly_1", "gone")),
        MockReply::json(serde_json::json!({ "frames": [] })),
    ]);
    let mut assembly = iris_assembly();

    let err = assembly
        .fit(&conn, &local_frame("iris.hex", &IRIS_COLUMNS))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AssemblyError::Client(ClientError::Server { status: 404, .. })
    ));
    assert_eq!(assembly.id(), Some("assembly_1"));
    assert!(assembly.in_colnames.is_none());
    assert!(assembly.out_colnames.is_none());
}

#[tokio::test]
async fn test_assembly_is_exportable_when_result_fetch_fails() {
    let (conn, log) = mock_connection(vec![
        MockReply::json(assembly_json("assembly_srv", "res")),
        MockReply::error(500, serde_json::json!({ "msg": "frame fetch failed" })),
        MockReply::text("public class Recovered {}\n"),
    ]);
    let mut assembly = iris_assembly();

    let err = assembly
        .fit(&conn, &local_frame("iris.hex", &IRIS_COLUMNS))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "server returned 500 for GET /3/Frames/res: frame fetch failed");

    let mut out: Vec<u8> = Vec::new();
    let export = assembly
        .to_pojo_into(&conn, PojoOptions::new().with_name("Recovered"), &mut out)
        .await
        .unwrap();

    assert_eq!(export.pojo_name, "Recovered");
    let paths: Vec<String> = requests(&log).iter().map(ToString::to_string).collect();
    assert_eq!(
        paths,
        vec![
            "POST /99/Assembly",
            "GET /3/Frames/res",
            "GET /99/Assembly.java/assembly_srv/Recovered",
        ]
    );
}

#[tokio::test]
async fn test_mock_transport_replies_in_order() {
    let (conn, log) = mock_connection(vec![MockReply::text("first"), MockReply::text("second")]);
    let get = |path: &str| ApiRequest::parse(&format!("GET {}", path)).unwrap();

    assert_eq!(conn.api_text(get("/a")).await.unwrap(), "first");
    assert_eq!(conn.api_text(get("/b")).await.unwrap(), "second");
    assert!(conn.api_text(get("/c")).await.is_err());

    let seen: Vec<String> = requests(&log).iter().map(|r| r.path.clone()).collect();
    assert_eq!(seen, vec!["/a", "/b", "/c"]);
}

#[tokio::test]
async fn test_fit_from_yaml_definition() {
    let yaml = r#"
name: iris_munge
steps:
  - name: keep
    type: col_select
    cols: [sepal_len, petal_len]
  - name: ratio
    type: binary_op
    op: "/"
    col: sepal_len
    right: { col: petal_len }
    new_col_name: ratio
"#;
    let mut assembly = AssemblyConfig::from_yaml(yaml)
        .unwrap()
        .to_assembly()
        .unwrap();
    assert_eq!(assembly.names(), vec!["keep"]);

    let (conn, log) = mock_connection(vec![
        MockReply::json(assembly_json("assembly_yaml", "res_yaml")),
        MockReply::json(frame_json("res_yaml", 150, &["sepal_len", "petal_len", "ratio"])),
    ]);

    let result = assembly
        .fit(&conn, &local_frame("iris.hex", &IRIS_COLUMNS))
        .await
        .unwrap();
    assert_eq!(result.ncols(), 3);

    let steps = requests(&log)[0].param_value("steps").unwrap().to_string();
    assert!(steps.contains(
        "ratio__H2OBinaryOp__(/ (cols_py dummy 'sepal_len') (cols_py dummy 'petal_len'))__False__ratio"
    ));
}
