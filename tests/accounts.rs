mod common;

use common::{pref, register, register_request, state};
use voicehome_lib::{
    accounts::{commands, ImageUpload, LoginRequest, ProfileRequest},
    db::models::{Preference, PreferenceSummary, Role},
    error::HomeError,
    models::Room,
    preferences::{PlannedWrite, PreferenceError, WriteOp},
};

fn summary(room: Room, intent: u8, intensity: u8) -> PreferenceSummary {
    PreferenceSummary {
        room,
        intent,
        intensity,
    }
}

#[tokio::test]
async fn register_then_login() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);

    let request = register_request("ada", vec![pref("living", 1, 0), pref("kitchen", 0, 1)]);
    let session = commands::register(&state, request).await.unwrap();
    assert_eq!(session.name, "Ada");

    let login = commands::login(
        &state,
        LoginRequest {
            username: "ada".into(),
            password: "secret".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(login, session);

    let users = commands::list_users(&state, &session.admin_id).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role, Role::Owner);

    let profile = commands::user_details(&state, &users[0].id).await.unwrap();
    assert_eq!(
        profile.preferences,
        vec![summary(Room::Kitchen, 0, 1), summary(Room::Hall, 1, 0)]
    );
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);
    register(&state, "ada").await;

    for (username, password) in [("ada", "nope"), ("nobody", "secret")] {
        let err = commands::login(
            &state,
            LoginRequest {
                username: username.into(),
                password: password.into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, HomeError::InvalidCredentials));
        assert_eq!(err.status_code(), 401);
    }
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);
    let first = register(&state, "ada").await;

    let err = commands::register(&state, register_request("ada", Vec::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, HomeError::UsernameTaken(ref name) if name == "ada"));
    assert_eq!(err.status_code(), 409);

    let users = commands::list_users(&state, &first.admin_id).await.unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn registration_requires_fields() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);

    let mut request = register_request("ada", Vec::new());
    request.username = "  ".into();
    let err = commands::register(&state, request).await.unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn invalid_preferences_block_registration() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);

    let request = register_request("ada", vec![pref("kitchen", 1, 0), pref("attic", 1, 0)]);
    let err = commands::register(&state, request).await.unwrap_err();
    assert!(matches!(
        err,
        HomeError::Preference(PreferenceError::InvalidPreference { .. })
    ));

    let err = commands::login(
        &state,
        LoginRequest {
            username: "ada".into(),
            password: "secret".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, HomeError::InvalidCredentials));
}

#[tokio::test]
async fn add_and_edit_profiles() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);
    let session = register(&state, "ada").await;

    let added = commands::add_profile(
        &state,
        &session.admin_id,
        ProfileRequest {
            name: "Bea".into(),
            preferences: vec![pref("bedroom2", 1, 1)],
            image: Some(ImageUpload {
                filename: "../bea.png".into(),
                bytes: vec![0x89, b'P', b'N', b'G'],
            }),
        },
    )
    .await
    .unwrap();
    assert_eq!(added.role, Role::Resident);
    assert_eq!(added.preferences, vec![summary(Room::Guest, 1, 1)]);
    let image_path = added.image_path.clone().unwrap();
    assert_eq!(
        std::path::PathBuf::from(&image_path),
        dir.path().join("images").join("bea.png")
    );

    let edited = commands::edit_profile(
        &state,
        &added.user_id,
        ProfileRequest {
            name: "Beatrice".into(),
            preferences: vec![pref("bedroom2", 0, 0), pref("kitchen", 1, 0)],
            image: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(edited.name, "Beatrice");
    assert_eq!(edited.image_path, Some(image_path));
    assert_eq!(
        edited.preferences,
        vec![summary(Room::Kitchen, 1, 0), summary(Room::Guest, 0, 0)]
    );

    let users = commands::list_users(&state, &session.admin_id).await.unwrap();
    let names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["Ada", "Beatrice"]);
}

#[tokio::test]
async fn add_profile_needs_a_known_admin() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);
    let request = ProfileRequest {
        name: "Bea".into(),
        ..ProfileRequest::default()
    };

    let err = commands::add_profile(&state, "not-a-uuid", request.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, HomeError::InvalidId { kind: "admin", .. }));

    let err = commands::add_profile(&state, "6f1d0c1e-8a55-4a38-9d0f-2c1f0b7d9a11", request)
        .await
        .unwrap_err();
    assert!(matches!(err, HomeError::NotFound("Admin")));
}

#[tokio::test]
async fn edit_profile_of_missing_user_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);

    let err = commands::edit_profile(
        &state,
        "6f1d0c1e-8a55-4a38-9d0f-2c1f0b7d9a11",
        ProfileRequest {
            name: "Ghost".into(),
            ..ProfileRequest::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn applying_preferences_twice_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);
    let session = register(&state, "ada").await;
    let owner = &commands::list_users(&state, &session.admin_id).await.unwrap()[0];

    let batch = vec![pref("living", 1, 1), pref("bedroom1", 0, 1)];
    let first = commands::update_preferences(&state, &owner.id, batch.clone())
        .await
        .unwrap();
    let ids: Vec<_> = state
        .db
        .load_preferences(&owner.id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();

    let second = commands::update_preferences(&state, &owner.id, batch)
        .await
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first, vec![summary(Room::Master, 0, 1), summary(Room::Hall, 1, 1)]);

    let ids_again: Vec<_> = state
        .db
        .load_preferences(&owner.id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, ids_again);
}

#[tokio::test]
async fn invalid_batch_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);
    let session = register(&state, "ada").await;
    let owner = &commands::list_users(&state, &session.admin_id).await.unwrap()[0];

    commands::update_preferences(&state, &owner.id, vec![pref("kitchen", 1, 1)])
        .await
        .unwrap();

    let err = commands::update_preferences(
        &state,
        &owner.id,
        vec![pref("kitchen", 0, 0), pref("hall", 2, 0)],
    )
    .await
    .unwrap_err();
    assert_eq!(err.status_code(), 400);

    let stored = commands::user_details(&state, &owner.id).await.unwrap();
    assert_eq!(stored.preferences, vec![summary(Room::Kitchen, 1, 1)]);
}

#[tokio::test]
async fn preferences_for_unknown_user_fail() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);

    let err = commands::update_preferences(
        &state,
        "6f1d0c1e-8a55-4a38-9d0f-2c1f0b7d9a11",
        vec![pref("kitchen", 1, 1)],
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        HomeError::Preference(PreferenceError::UnknownUser(_))
    ));
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn save_preference_updates_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);
    let session = register(&state, "ada").await;
    let owner = &commands::list_users(&state, &session.admin_id).await.unwrap()[0];

    let mut preference = Preference {
        id: "pref-1".into(),
        user_id: owner.id.clone(),
        room: Room::Guest,
        intent: true,
        intensity: false,
    };
    state
        .db
        .save_preference(PlannedWrite {
            op: WriteOp::Insert,
            preference: preference.clone(),
        })
        .await
        .unwrap();

    preference.intensity = true;
    state
        .db
        .save_preference(PlannedWrite {
            op: WriteOp::Update,
            preference: preference.clone(),
        })
        .await
        .unwrap();

    let stored = state.db.load_preferences(&owner.id).await.unwrap();
    assert_eq!(stored, vec![preference]);
}

#[tokio::test]
async fn listing_an_unknown_household_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);
    let users = commands::list_users(&state, "6f1d0c1e-8a55-4a38-9d0f-2c1f0b7d9a11")
        .await
        .unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn failed_preference_write_rolls_back_rename() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);
    let session = register(&state, "ada").await;
    let owner = &commands::list_users(&state, &session.admin_id).await.unwrap()[0];

    // Points at a user that does not exist, so the foreign key rejects it.
    let orphan = PlannedWrite {
        op: WriteOp::Insert,
        preference: Preference {
            id: "pref-orphan".into(),
            user_id: "6f1d0c1e-8a55-4a38-9d0f-2c1f0b7d9a11".into(),
            room: Room::Kitchen,
            intent: true,
            intensity: true,
        },
    };
    let result = state
        .db
        .update_user_profile(&owner.id, "Renamed".into(), None, vec![orphan])
        .await;
    assert!(result.is_err());

    let profile = commands::user_details(&state, &owner.id).await.unwrap();
    assert_eq!(profile.name, "Ada");
    assert!(profile.preferences.is_empty());
}

#[tokio::test]
async fn boolean_and_float_flags_are_stored() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);
    let session = register(&state, "ada").await;
    let owner = &commands::list_users(&state, &session.admin_id).await.unwrap()[0];

    let batch = serde_json::from_str(
        r#"[{"room":"kitchen","intent":true,"intensity":0.0},{"room":"bedroom1","intent":0,"intensity":1.0}]"#,
    )
    .unwrap();
    let stored = commands::update_preferences(&state, &owner.id, batch)
        .await
        .unwrap();
    assert_eq!(
        stored,
        vec![summary(Room::Kitchen, 1, 0), summary(Room::Master, 0, 1)]
    );

    let batch = serde_json::from_str(r#"[{"room":"hall","intensity":1}]"#).unwrap();
    let err = commands::update_preferences(&state, &owner.id, batch)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        HomeError::Preference(PreferenceError::InvalidPreference { .. })
    ));
    assert_eq!(err.status_code(), 400);
}
