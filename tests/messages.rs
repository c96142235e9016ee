mod common;
use axum::http::StatusCode;
use serde_json::json;

use crate::common::{
    ADMIN, Action, Flow, LEARNER, json, seed_curriculum, setup_server, setup_test_db, sign_in_as,
};

#[tokio::test]
async fn comments_are_threaded_under_the_lesson() {
    let db = setup_test_db().await;
    let seeded = seed_curriculum(&db).await;
    let mut server = setup_server(&db).await;
    sign_in_as(&mut server, &db, "alice", LEARNER).await;

    let lesson = seeded.lessons[0][0];
    let other_lesson = seeded.lessons[0][1];
    let ctx = Flow::new()
        .step(
            Action::new("first comment", "POST", "")
                .with_path(format!("/lessons/{lesson}/messages"))
                .with_body(json!({ "content": "  What is a loop?  " }))
                .with_expect(StatusCode::CREATED)
                .assert_body(|body| assert_eq!(json(body)["content"], "What is a loop?"))
                .with_save_as("question"),
        )
        .step(
            Action::new("second comment", "POST", "")
                .with_path(format!("/lessons/{lesson}/messages"))
                .with_body(json!({ "content": "Nice lesson" }))
                .with_expect(StatusCode::CREATED),
        )
        .step(
            Action::new("reply", "POST", "")
                .with_path(format!("/lessons/{lesson}/messages"))
                .with_dyn_body(|ctx| {
                    json!({ "content": "It repeats things", "parent_id": ctx.get("question")["id"] })
                })
                .with_expect(StatusCode::CREATED)
                .with_save_as("reply"),
        )
        .step(
            Action::new("reply to a reply", "POST", "")
                .with_path(format!("/lessons/{lesson}/messages"))
                .with_dyn_body(|ctx| json!({ "content": "deeper", "parent_id": ctx.get("reply")["id"] }))
                .with_expect(StatusCode::BAD_REQUEST),
        )
        .step(
            Action::new("reply from another lesson", "POST", "")
                .with_path(format!("/lessons/{other_lesson}/messages"))
                .with_dyn_body(|ctx| json!({ "content": "lost", "parent_id": ctx.get("question")["id"] }))
                .with_expect(StatusCode::BAD_REQUEST),
        )
        .step(
            Action::new("missing parent", "POST", "")
                .with_path(format!("/lessons/{lesson}/messages"))
                .with_body(json!({ "content": "hello?", "parent_id": 999999 }))
                .with_expect(StatusCode::BAD_REQUEST),
        )
        .step(
            Action::new("blank", "POST", "")
                .with_path(format!("/lessons/{lesson}/messages"))
                .with_body(json!({ "content": "   " }))
                .with_expect(StatusCode::BAD_REQUEST)
                .assert_body(|body| assert!(body.contains("content is empty"))),
        )
        .step(
            Action::new("lesson", "GET", "")
                .with_path(format!("/lessons/{lesson}"))
                .assert_body(|body| {
                    let view = json(body);
                    let comments = view["comments"].as_array().unwrap();
                    assert_eq!(comments.len(), 2);
                    assert_eq!(comments[0]["message_content"], "What is a loop?");
                    assert_eq!(comments[0]["user_github_display_name"], "alice display");
                    assert_eq!(comments[0]["replies"][0]["message_content"], "It repeats things");
                    assert_eq!(comments[1]["message_content"], "Nice lesson");
                    assert!(comments[1]["replies"].as_array().unwrap().is_empty());
                }),
        )
        .step(Action::new("dashboard", "GET", "/").assert_body(|body| {
            let activity = json(body)["activity"].clone();
            let activity = activity.as_array().unwrap();
            assert_eq!(activity.len(), 3);
            assert_eq!(activity[0]["message_content"], "It repeats things");
            assert_eq!(activity[0]["lesson_name"], "Lesson 1a");
        }))
        .run(&mut server)
        .await;

    assert_eq!(ctx.get("reply")["parent_id"], ctx.get("question")["id"]);
}

#[tokio::test]
async fn only_the_author_or_an_admin_edits() {
    let db = setup_test_db().await;
    let seeded = seed_curriculum(&db).await;
    let mut server = setup_server(&db).await;
    let lesson = seeded.lessons[1][0];

    sign_in_as(&mut server, &db, "alice", LEARNER).await;
    let ctx = Flow::new()
        .step(
            Action::new("comment", "POST", "")
                .with_path(format!("/lessons/{lesson}/messages"))
                .with_body(json!({ "content": "first!" }))
                .with_expect(StatusCode::CREATED)
                .with_save_as("message"),
        )
        .step(
            Action::new("edit own", "PUT", "")
                .with_dyn_path(|ctx| format!("/messages/{}", ctx.get("message")["id"]))
                .with_body(json!({ "content": "first, edited" }))
                .assert_body(|body| assert_eq!(json(body)["content"], "first, edited")),
        )
        .run(&mut server)
        .await;
    let id = ctx.get("message")["id"].as_i64().unwrap();

    sign_in_as(&mut server, &db, "mallory", LEARNER).await;
    Flow::new()
        .step(
            Action::new("edit foreign", "PUT", "")
                .with_path(format!("/messages/{id}"))
                .with_body(json!({ "content": "pwned" }))
                .with_expect(StatusCode::FORBIDDEN),
        )
        .step(
            Action::new("delete foreign", "DELETE", "")
                .with_path(format!("/messages/{id}"))
                .with_expect(StatusCode::FORBIDDEN),
        )
        .step(
            Action::new("edit unknown", "PUT", "/messages/999999")
                .with_body(json!({ "content": "nope" }))
                .with_expect(StatusCode::NOT_FOUND),
        )
        .run(&mut server)
        .await;

    sign_in_as(&mut server, &db, "root", ADMIN).await;
    Flow::new()
        .step(
            Action::new("admin deletes", "DELETE", "")
                .with_path(format!("/messages/{id}")),
        )
        .step(
            Action::new("gone", "PUT", "")
                .with_path(format!("/messages/{id}"))
                .with_body(json!({ "content": "again" }))
                .with_expect(StatusCode::NOT_FOUND),
        )
        .run(&mut server)
        .await;
}
