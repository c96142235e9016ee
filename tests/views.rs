mod common;
use axum::http::StatusCode;
use serde_json::Value;

use crate::common::{
    ADMIN, Action, Flow, LEARNER, json, seed_curriculum, set_flags, setup_server, setup_test_db,
    sign_in, sign_in_as,
};

fn lesson_names(chapter: &Value) -> Vec<String> {
    chapter["lessons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["lesson_name"].as_str().unwrap().to_string())
        .collect()
}

fn ids(list: &Value, key: &str) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|c| c[key].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn dashboard_shows_sorted_curriculum() {
    let db = setup_test_db().await;
    let seeded = seed_curriculum(&db).await;
    let mut server = setup_server(&db).await;
    sign_in_as(&mut server, &db, "alice", LEARNER).await;

    let chapters: Vec<i64> = seeded.chapters.iter().map(|&id| i64::from(id)).collect();
    Flow::new()
        .step(Action::new("dashboard", "GET", "/").assert_body(move |body| {
            let view = json(body);
            assert_eq!(view["user"]["github_username"], "alice");
            assert_eq!(view["is_admin"], false);

            assert_eq!(ids(&view["chapters"], "chapter_id"), chapters);
            assert_eq!(
                lesson_names(&view["chapters"][0]),
                ["Lesson 1a", "Lesson 1b", "Lesson 1c", "Lesson 1d"]
            );
            assert_eq!(lesson_names(&view["chapters"][1]), ["Lesson 2a"]);
            assert_eq!(lesson_names(&view["chapters"][2]), ["Lesson 3a", "Lesson 3b"]);

            let progress = &view["progress"];
            assert_eq!(progress["chapters_total"], 3);
            assert_eq!(progress["lessons_total"], 7);
            assert_eq!(progress["lessons_percent"], 0);
            assert_eq!(view["activity"].as_array().unwrap().len(), 0);
        }))
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn account_state_gates_views() {
    let db = setup_test_db().await;
    let mut server = setup_server(&db).await;
    sign_in(&mut server, "bob").await; // fresh accounts start unverified

    Flow::new()
        .step(
            Action::new("unverified", "GET", "/")
                .with_expect(StatusCode::FORBIDDEN)
                .assert_body(|body| assert!(body.contains("Please verify your account."))),
        )
        .run(&mut server)
        .await;

    set_flags(
        &db,
        "bob",
        textbook::model::entity::UserFlags {
            admin: false,
            verified: true,
            active: false,
        },
    )
    .await;

    Flow::new()
        .step(
            Action::new("inactive", "GET", "/")
                .with_expect(StatusCode::FORBIDDEN)
                .assert_body(|body| assert!(body.contains("Your account is inactive."))),
        )
        .step(
            Action::new("admin area", "GET", "/admin/users/page")
                .with_expect(StatusCode::FORBIDDEN)
                .assert_body(|body| assert!(body.contains("Your account is inactive."))),
        )
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn second_login_keeps_the_account() {
    let db = setup_test_db().await;
    let mut server = setup_server(&db).await;
    let first = sign_in_as(&mut server, &db, "carol", LEARNER).await;
    sign_in(&mut server, "carol").await;

    let id = first.id();
    Flow::new()
        .step(Action::new("dashboard", "GET", "/").assert_body(move |body| {
            let view = json(body);
            assert_eq!(view["user"]["id"], id);
            assert_eq!(view["user"]["verified"], true);
            assert_eq!(view["user"]["github_display_name"], "carol display");
        }))
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn reading_every_lesson_completes_the_chapter() {
    let db = setup_test_db().await;
    let seeded = seed_curriculum(&db).await;
    let mut server = setup_server(&db).await;
    sign_in_as(&mut server, &db, "dave", LEARNER).await;

    let only_lesson = seeded.lessons[1][0];
    let first_chapter_lesson = seeded.lessons[0][0];
    Flow::new()
        .step(
            Action::new("read 2a", "POST", "")
                .with_path(format!("/lessons/{only_lesson}/read"))
                .with_param("read", "true")
                .assert_body(|body| assert_eq!(json(body)["read"], true)),
        )
        .step(
            Action::new("read 1a", "POST", "")
                .with_path(format!("/lessons/{first_chapter_lesson}/read"))
                .with_param("read", "true"),
        )
        .step(Action::new("dashboard", "GET", "/").assert_body(|body| {
            let view = json(body);
            assert_eq!(view["chapters"][0]["chapter_read"], false);
            assert_eq!(view["chapters"][0]["lessons"][0]["lesson_read"], true);
            assert_eq!(view["chapters"][1]["chapter_read"], true);

            let progress = &view["progress"];
            assert_eq!(progress["chapters_completed"], 1);
            assert_eq!(progress["chapters_percent"], 33);
            assert_eq!(progress["lessons_read"], 2);
            assert_eq!(progress["lessons_percent"], 29);
        }))
        .step(
            Action::new("unread 2a", "POST", "")
                .with_path(format!("/lessons/{only_lesson}/read"))
                .with_param("read", "false"),
        )
        .step(Action::new("dashboard again", "GET", "/").assert_body(|body| {
            let view = json(body);
            assert_eq!(view["chapters"][1]["chapter_read"], false);
            assert_eq!(view["progress"]["chapters_completed"], 0);
        }))
        .step(
            Action::new("read hidden", "POST", "")
                .with_path(format!("/lessons/{}/read", seeded.hidden_lesson))
                .with_param("read", "true")
                .with_expect(StatusCode::NOT_FOUND),
        )
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn chapter_view_links_neighbours() {
    let db = setup_test_db().await;
    let seeded = seed_curriculum(&db).await;
    let mut server = setup_server(&db).await;
    sign_in_as(&mut server, &db, "erin", LEARNER).await;

    let [first, second, third] = [0, 1, 2].map(|i| i64::from(seeded.chapters[i]));
    Flow::new()
        .step(
            Action::new("middle chapter", "GET", "")
                .with_path(format!("/chapter/{second}"))
                .assert_body(move |body| {
                    let view = json(body);
                    assert_eq!(view["chapter"]["name"], "Conditional logic");
                    assert_eq!(ids(&view["previous"], "id"), [first]);
                    assert_eq!(ids(&view["next"], "id"), [third]);
                    assert_eq!(view["lessons"].as_array().unwrap().len(), 1);
                    assert_eq!(view["sidebar"].as_array().unwrap().len(), 3);
                }),
        )
        .step(
            Action::new("first chapter", "GET", "")
                .with_path(format!("/chapter/{first}"))
                .assert_body(move |body| {
                    let view = json(body);
                    assert!(view["previous"].as_array().unwrap().is_empty());
                    assert_eq!(ids(&view["next"], "id"), [second]);
                    assert_eq!(view["standards"][0]["name"], "Write a for loop");
                    assert_eq!(
                        lesson_names(&view),
                        ["Lesson 1a", "Lesson 1b", "Lesson 1c", "Lesson 1d"]
                    );
                }),
        )
        .step(
            Action::new("last chapter", "GET", "")
                .with_path(format!("/chapter/{third}"))
                .assert_body(move |body| {
                    let view = json(body);
                    assert_eq!(ids(&view["previous"], "id"), [second]);
                    assert!(view["next"].as_array().unwrap().is_empty());
                }),
        )
        .step(
            Action::new("not a number", "GET", "/chapter/abc")
                .with_expect(StatusCode::BAD_REQUEST),
        )
        .step(Action::new("unknown", "GET", "/chapter/999999").with_expect(StatusCode::NOT_FOUND))
        .step(
            Action::new("inactive", "GET", "")
                .with_path(format!("/chapter/{}", seeded.hidden_chapter))
                .with_expect(StatusCode::NOT_FOUND),
        )
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn lesson_view_shows_read_state() {
    let db = setup_test_db().await;
    let seeded = seed_curriculum(&db).await;
    let mut server = setup_server(&db).await;
    sign_in_as(&mut server, &db, "frank", LEARNER).await;

    let lesson = seeded.lessons[2][1];
    Flow::new()
        .step(
            Action::new("lesson", "GET", "")
                .with_path(format!("/lessons/{lesson}"))
                .assert_body(|body| {
                    let view = json(body);
                    assert_eq!(view["lesson"]["name"], "Lesson 3b");
                    assert_eq!(view["read"], false);
                    assert!(view["comments"].as_array().unwrap().is_empty());
                }),
        )
        .step(
            Action::new("mark", "POST", "")
                .with_path(format!("/lessons/{lesson}/read"))
                .with_param("read", "true"),
        )
        .step(
            Action::new("lesson again", "GET", "")
                .with_path(format!("/lessons/{lesson}"))
                .assert_body(|body| assert_eq!(json(body)["read"], true)),
        )
        .step(
            Action::new("hidden lesson", "GET", "")
                .with_path(format!("/lessons/{}", seeded.hidden_lesson))
                .with_expect(StatusCode::NOT_FOUND),
        )
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn malformed_ids_are_json_bad_requests() {
    let db = setup_test_db().await;
    let mut server = setup_server(&db).await;
    sign_in_as(&mut server, &db, "grace", ADMIN).await;

    let bad_id = |body: &str| {
        let error = json(body);
        assert_eq!(error["status_code"], "400");
        assert!(error["message"].as_str().unwrap().contains("\"abc\""));
    };

    Flow::new()
        .step(
            Action::new("lesson", "GET", "/lessons/abc")
                .with_expect(StatusCode::BAD_REQUEST)
                .assert_body(bad_id),
        )
        .step(
            Action::new("mark read", "POST", "/lessons/abc/read")
                .with_param("read", "true")
                .with_expect(StatusCode::BAD_REQUEST)
                .assert_body(bad_id),
        )
        .step(
            Action::new("edit message", "PUT", "/messages/abc")
                .with_body(serde_json::json!({ "content": "hi" }))
                .with_expect(StatusCode::BAD_REQUEST)
                .assert_body(bad_id),
        )
        .step(
            Action::new("admin lesson", "DELETE", "/admin/lessons/abc")
                .with_expect(StatusCode::BAD_REQUEST)
                .assert_body(bad_id),
        )
        .step(
            Action::new("user flags", "PUT", "/admin/users/abc/flags")
                .with_body(serde_json::json!({ "admin": false, "verified": true, "active": true }))
                .with_expect(StatusCode::BAD_REQUEST)
                .assert_body(bad_id),
        )
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn deactivated_admin_is_locked_out() {
    let db = setup_test_db().await;
    let mut server = setup_server(&db).await;
    sign_in_as(
        &mut server,
        &db,
        "heidi",
        textbook::model::entity::UserFlags {
            admin: true,
            verified: true,
            active: false,
        },
    )
    .await;

    Flow::new()
        .step(
            Action::new("admin area", "GET", "/admin/chapters/page")
                .with_expect(StatusCode::FORBIDDEN)
                .assert_body(|body| assert!(body.contains("Your account is inactive."))),
        )
        .step(Action::new("dashboard", "GET", "/").with_expect(StatusCode::FORBIDDEN))
        .run(&mut server)
        .await;
}
