use pleasanter_client::models::{setup_search_type, SearchType};
use pleasanter_client::{Error, RecordQuery};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{base_payload, envelope, spawn_test_app, API_KEY};

fn table_site() -> serde_json::Value {
    envelope(json!({
        "Data": {
            "ReferenceType": "Results",
            "SiteSettings": {
                "Columns": [
                    {"ColumnName": "ClassA", "LabelText": "Category"},
                    {"ColumnName": "Title", "LabelText": "Name"},
                    {"ColumnName": "NumA"}
                ],
                "EditorColumnHash": {"General": ["Title", "ClassA"]}
            }
        }
    }))
}

#[tokio::test]
async fn mapping_columns_include_defaults_and_labels() {
    let app = spawn_test_app().await;
    Mock::given(method("POST"))
        .and(path("/api/items/2/getsite"))
        .and(body_json(base_payload()))
        .respond_with(ResponseTemplate::new(200).set_body_json(table_site()))
        .mount(&app.server)
        .await;

    let mapping = app.service.get_mapping_columns("2").await.unwrap();

    assert_eq!(mapping["CreatedTime"], "CreatedTime");
    assert_eq!(mapping["Updator"], "Updator");
    assert_eq!(mapping["ClassA"], "Category");
    assert_eq!(mapping["Title"], "Name");
    assert_eq!(mapping["NumA"], "NumA");
    assert_eq!(mapping.len(), 7);

    let keys: Vec<&str> = mapping.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["CreatedTime", "UpdatedTime", "Updator", "Creator", "ClassA", "Title", "NumA"]
    );
}

#[tokio::test]
async fn edit_columns_append_audit_columns() {
    let app = spawn_test_app().await;
    Mock::given(method("POST"))
        .and(path("/api/items/2/getsite"))
        .respond_with(ResponseTemplate::new(200).set_body_json(table_site()))
        .mount(&app.server)
        .await;

    let columns = app.service.get_edit_columns("2").await.unwrap();

    assert_eq!(
        columns,
        vec!["Title", "ClassA", "CreatedTime", "UpdatedTime", "Creator", "Updator"]
    );
}

#[tokio::test]
async fn directory_site_is_rejected() {
    let app = spawn_test_app().await;
    Mock::given(method("POST"))
        .and(path("/api/items/1/getsite"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({"Data": {"ReferenceType": "Sites"}}))))
        .mount(&app.server)
        .await;

    let result = app.service.get_edit_columns("1").await;
    assert!(matches!(result, Err(Error::DirectorySite { site_id }) if site_id == "1"));
}

#[tokio::test]
async fn unexpected_reference_type_is_rejected() {
    let app = spawn_test_app().await;
    Mock::given(method("POST"))
        .and(path("/api/items/3/getsite"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({"Data": {"ReferenceType": "Wikis"}}))))
        .mount(&app.server)
        .await;

    let result = app.service.get_mapping_columns("3").await;
    assert!(matches!(result, Err(Error::UnexpectedReferenceType(kind)) if kind == "Wikis"));
}

#[tokio::test]
async fn get_record_rejects_equal_ids_without_a_request() {
    let app = spawn_test_app().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.server)
        .await;

    let result = app.service.get_record("4", "4", None).await;
    assert!(matches!(result, Err(Error::InvalidId(_))));
}

#[tokio::test]
async fn get_record_returns_the_single_record() {
    let app = spawn_test_app().await;
    Mock::given(method("POST"))
        .and(path("/api/items/4/get"))
        .and(body_json(json!({
            "ApiVersion": 1.1,
            "apiKey": API_KEY,
            "View": {"ApiDataType": "KeyValues", "GridColumns": ["Title"]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({"Data": [{"Title": "aaaa"}]}))))
        .expect(1)
        .mount(&app.server)
        .await;

    let record = app
        .service
        .get_record("2", "4", Some(vec!["Title".to_string()]))
        .await
        .unwrap();

    assert_eq!(record, json!({"Title": "aaaa"}));
}

#[tokio::test]
async fn get_record_with_several_rows_is_not_a_record_id() {
    let app = spawn_test_app().await;
    Mock::given(method("POST"))
        .and(path("/api/items/2/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({"Data": [{"Title": "a"}, {"Title": "b"}]}))))
        .mount(&app.server)
        .await;

    let result = app.service.get_record("1", "2", None).await;
    assert!(matches!(result, Err(Error::InvalidId(_))));
}

#[tokio::test]
async fn get_records_sends_view_and_offset() {
    let app = spawn_test_app().await;
    Mock::given(method("POST"))
        .and(path("/api/items/2/get"))
        .and(body_partial_json(json!({
            "Offset": 200,
            "View": {
                "ApiDataType": "KeyValues",
                "ColumnFilterHash": {"ClassA": "FromAPI"},
                "ColumnFilterSearchTypes": {"ClassA": "ExactMatch"}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "Offset": 200,
            "PageSize": 200,
            "TotalCount": 201,
            "Data": [{"Title": "last"}]
        }))))
        .expect(1)
        .mount(&app.server)
        .await;

    let filters = json!({"ClassA": "FromAPI"}).as_object().unwrap().clone();
    let query = RecordQuery {
        search_types: Some(setup_search_type(&["ClassA".to_string()], SearchType::ExactMatch)),
        filters: Some(filters),
        offset: 200,
        ..RecordQuery::default()
    };

    let page = app.service.get_records("2", query).await.unwrap();
    assert_eq!(page.records, vec![json!({"Title": "last"})]);
    assert_eq!(page.offset, 200);
    assert_eq!(page.page_size, 200);
    assert_eq!(page.total_count, 201);
}

#[tokio::test]
async fn get_records_on_a_folder_is_rejected() {
    let app = spawn_test_app().await;
    Mock::given(method("POST"))
        .and(path("/api/items/1/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({"Data": {"Title": "folder"}}))))
        .mount(&app.server)
        .await;

    let result = app.service.get_records("1", RecordQuery::default()).await;
    assert!(matches!(result, Err(Error::InvalidId(_))));
}

#[tokio::test]
async fn create_record_merges_fields_into_the_payload() {
    let app = spawn_test_app().await;
    Mock::given(method("POST"))
        .and(path("/api/items/1/create"))
        .and(body_json(json!({
            "ApiVersion": 1.1,
            "apiKey": API_KEY,
            "Title": "aaaa",
            "Status": "100",
            "ClassHash": {"ClassA": "FromAPI", "ClassB": "FromAPI"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Id": 7, "StatusCode": 200})))
        .expect(1)
        .mount(&app.server)
        .await;

    let fields = json!({
        "Title": "aaaa",
        "Status": "100",
        "ClassHash": {"ClassA": "FromAPI", "ClassB": "FromAPI"}
    });

    app.service
        .create_record("1", fields.as_object().unwrap().clone())
        .await
        .unwrap();
}

#[tokio::test]
async fn update_does_not_leak_fields_into_later_calls() {
    let app = spawn_test_app().await;
    Mock::given(method("POST"))
        .and(path("/api/items/6/update"))
        .and(body_partial_json(json!({"Title": "API"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Id": 6, "StatusCode": 200})))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/items/6/get"))
        .and(body_json(base_payload()))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({"Data": []}))))
        .expect(1)
        .mount(&app.server)
        .await;

    let fields = json!({"Title": "API", "ClassHash": {"ClassA": "UpdateScript"}});
    app.service
        .update_record("6", fields.as_object().unwrap().clone())
        .await
        .unwrap();

    app.service.fetch_envelope("6").await.unwrap();
}

#[tokio::test]
async fn update_of_missing_record_reports_status() {
    let app = spawn_test_app().await;
    Mock::given(method("POST"))
        .and(path("/api/items/99/update"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&app.server)
        .await;

    let result = app
        .service
        .update_record("99", serde_json::Map::new())
        .await;
    assert!(matches!(result, Err(Error::Request { status: 404 })));
}
