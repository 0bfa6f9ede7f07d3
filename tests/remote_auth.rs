use kusina::auth::{AuthError, RemoteAuth};
use kusina::client::{HttpClient, IdentityClient};
use mockito::{Matcher, Server};
use std::time::Duration;
use tempfile::tempdir;

fn identity(server: &Server) -> IdentityClient {
    let http = HttpClient::new(true, Duration::from_secs(5)).unwrap();
    IdentityClient::new(http, &server.url(), "api-key")
}

fn key() -> Matcher {
    Matcher::UrlEncoded("key".into(), "api-key".into())
}

#[tokio::test]
async fn test_email_sign_in_persists_session() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/accounts:signInWithPassword")
        .match_query(key())
        .match_body(Matcher::PartialJsonString(
            r#"{"email":"cook@example.com","password":"pw","returnSecureToken":true}"#.into(),
        ))
        .with_status(200)
        .with_body(
            r#"{"localId":"uid-1","email":"cook@example.com","displayName":"Cook",
                "idToken":"id-tok","refreshToken":"ref-tok","expiresIn":"3600","registered":true}"#,
        )
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    let mut auth = RemoteAuth::at(identity(&server), path.clone()).unwrap();
    let user = auth
        .sign_in_with_email(" cook@example.com ", "pw")
        .await
        .unwrap();
    mock.assert_async().await;

    assert_eq!(user.uid, "uid-1");
    assert_eq!(user.name, "Cook");

    let reopened = RemoteAuth::at(identity(&server), path).unwrap();
    let session = reopened.session().unwrap();
    assert_eq!(session.id_token, "id-tok");
    assert_eq!(session.refresh_token, "ref-tok");
    assert_eq!(reopened.current_user().unwrap().email, "cook@example.com");
}

#[tokio::test]
async fn test_provider_rejection() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/accounts:signInWithPassword")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"error":{"code":400,"message":"INVALID_LOGIN_CREDENTIALS","errors":[]}}"#)
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let mut auth = RemoteAuth::at(identity(&server), dir.path().join("session.json")).unwrap();
    let err = auth.sign_in_with_email("a@b.c", "nope").await.unwrap_err();
    match err {
        AuthError::Rejected(msg) => assert_eq!(msg, "INVALID_LOGIN_CREDENTIALS"),
        other => panic!("unexpected error {:?}", other),
    }
    assert!(auth.current_user().is_none());
}

#[tokio::test]
async fn test_sign_up_sets_display_name() {
    let mut server = Server::new_async().await;
    let sign_up = server
        .mock("POST", "/accounts:signUp")
        .match_query(key())
        .with_status(200)
        .with_body(r#"{"localId":"uid-2","email":"new@example.com","idToken":"t1","refreshToken":"r1"}"#)
        .create_async()
        .await;
    let update = server
        .mock("POST", "/accounts:update")
        .match_query(key())
        .match_body(Matcher::PartialJsonString(
            r#"{"idToken":"t1","displayName":"Ana"}"#.into(),
        ))
        .with_status(200)
        .with_body(r#"{"localId":"uid-2","email":"new@example.com","displayName":"Ana","idToken":"t2","refreshToken":"r2"}"#)
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let mut auth = RemoteAuth::at(identity(&server), dir.path().join("session.json")).unwrap();
    let user = auth
        .sign_up_with_email("new@example.com", "pw123456", "Ana")
        .await
        .unwrap();

    sign_up.assert_async().await;
    update.assert_async().await;
    assert_eq!(user.name, "Ana");
    assert_eq!(auth.session().unwrap().id_token, "t2");
}

#[tokio::test]
async fn test_google_sign_in_uses_idp_endpoint() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/accounts:signInWithIdp")
        .match_query(key())
        .match_body(Matcher::PartialJsonString(
            r#"{"postBody":"id_token=g-token&providerId=google.com","requestUri":"http://localhost"}"#
                .into(),
        ))
        .with_status(200)
        .with_body(
            r#"{"localId":"uid-3","email":"g@example.com","displayName":"G","photoUrl":"https://p/g.png",
                "idToken":"t","refreshToken":"r","providerId":"google.com"}"#,
        )
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let mut auth = RemoteAuth::at(identity(&server), dir.path().join("session.json")).unwrap();
    let user = auth.sign_in_with_google("g-token").await.unwrap();
    mock.assert_async().await;
    assert_eq!(user.photo_url.as_deref(), Some("https://p/g.png"));
}

#[tokio::test]
async fn test_delete_account_clears_session() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/accounts:signInWithPassword")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"localId":"uid-4","email":"d@example.com","idToken":"del-tok","refreshToken":"r"}"#)
        .create_async()
        .await;
    let delete = server
        .mock("POST", "/accounts:delete")
        .match_query(key())
        .match_body(Matcher::PartialJsonString(r#"{"idToken":"del-tok"}"#.into()))
        .with_status(200)
        .with_body(r#"{"kind":"identitytoolkit#DeleteAccountResponse"}"#)
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    let mut auth = RemoteAuth::at(identity(&server), path.clone()).unwrap();

    assert!(matches!(
        auth.delete_account().await,
        Err(AuthError::NotSignedIn)
    ));

    auth.sign_in_with_email("d@example.com", "pw").await.unwrap();
    auth.delete_account().await.unwrap();
    delete.assert_async().await;

    assert!(auth.current_user().is_none());
    let reopened = RemoteAuth::at(identity(&server), path).unwrap();
    assert!(reopened.session().is_none());
}
