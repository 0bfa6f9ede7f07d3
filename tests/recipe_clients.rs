use kusina::client::{ClientError, DummyJsonClient, HttpClient, SpoonacularClient};
use mockito::{Matcher, Server};
use std::time::Duration;
use tokio::net::TcpListener;

fn http() -> HttpClient {
    HttpClient::new(true, Duration::from_secs(5)).unwrap()
}

const SPOON_RANDOM: &str = r#"{"recipes":[{
    "id": 716429,
    "title": "Pasta with Garlic, Scallions, Cauliflower & Breadcrumbs",
    "image": "https://img.spoonacular.com/recipes/716429-556x370.jpg",
    "imageType": "jpg",
    "readyInMinutes": 45,
    "servings": 2,
    "vegetarian": true,
    "cuisines": [],
    "extendedIngredients": [
        {"id": 1001, "aisle": "Milk, Eggs, Other Dairy", "name": "butter", "original": "1 tbsp butter", "amount": 1.0, "unit": "tbsp"},
        {"id": 11135, "name": "cauliflower florets", "nameClean": "cauliflower", "original": "2 cups cauliflower", "amount": 2.0, "unit": "cups"}
    ],
    "analyzedInstructions": [{"name": "", "steps": [{"number": 1, "step": "Boil the pasta."}]}]
}]}"#;

#[tokio::test]
async fn test_spoon_random_recipes() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/recipes/random")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("apiKey".into(), "k3y".into()),
            Matcher::UrlEncoded("number".into(), "20".into()),
        ]))
        .with_status(200)
        .with_body(SPOON_RANDOM)
        .create_async()
        .await;

    let client = SpoonacularClient::new(http(), &server.url(), "k3y");
    let recipes = client.random_recipes(20).await.unwrap();
    mock.assert_async().await;

    assert_eq!(recipes.len(), 1);
    let r = &recipes[0];
    assert_eq!(r.id, 716429);
    assert!(r.vegetarian);
    assert_eq!(r.summary, "No summary available");
    assert_eq!(r.extended_ingredients[0].name_clean, "butter");
    assert_eq!(r.extended_ingredients[1].name_clean, "cauliflower");
    assert_eq!(r.analyzed_instructions[0].steps[0].step, "Boil the pasta.");
}

#[tokio::test]
async fn test_spoon_requires_api_key() {
    let server = Server::new_async().await;
    let client = SpoonacularClient::new(http(), &server.url(), "");
    let err = client.random_recipes(20).await.unwrap_err();
    assert!(matches!(err, ClientError::MissingApiKey(_)));
}

#[tokio::test]
async fn test_spoon_similar_accepts_bare_list() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/recipes/716429/similar")
        .match_query(Matcher::UrlEncoded("number".into(), "10".into()))
        .with_status(200)
        .with_body(
            r#"[{"id":209128,"title":"Dinner Tonight: Grilled Romesco-Style Pork","imageType":"jpg",
                "readyInMinutes":45,"servings":4,"sourceUrl":"https://example.com/209128"}]"#,
        )
        .create_async()
        .await;

    let client = SpoonacularClient::new(http(), &server.url(), "k3y");
    let similar = client.similar(716429, 10).await.unwrap();
    assert_eq!(similar.len(), 1);
    assert_eq!(similar[0].id, 209128);
    assert_eq!(similar[0].servings, 4);
}

#[tokio::test]
async fn test_spoon_similar_accepts_wrapped_list() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/recipes/1/similar")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"recipes":[{"id":2,"title":"Two"},{"id":3,"title":"Three"}]}"#)
        .create_async()
        .await;

    let client = SpoonacularClient::new(http(), &server.url(), "k3y");
    let similar = client.similar(1, 10).await.unwrap();
    let titles: Vec<&str> = similar.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Two", "Three"]);
}

#[tokio::test]
async fn test_spoon_quota_error_surfaces_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/recipes/random")
        .match_query(Matcher::Any)
        .with_status(402)
        .with_body(r#"{"status":"failure","code":402,"message":"Your daily points limit has been reached."}"#)
        .create_async()
        .await;

    let client = SpoonacularClient::new(http(), &server.url(), "k3y");
    let err = client.random_recipes(20).await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 402, .. }));
    assert!(!err.is_offline());
}

#[tokio::test]
async fn test_dummyjson_recipes() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/recipes")
        .with_status(200)
        .with_body(
            r#"{"recipes":[
                {"id":1,"name":"Classic Margherita Pizza","ingredients":["Pizza dough","Tomato sauce","Fresh mozzarella cheese"],
                 "instructions":["Preheat the oven."],"prepTimeMinutes":20,"cookTimeMinutes":15,"servings":4,
                 "difficulty":"Easy","cuisine":"Italian","caloriesPerServing":300,"tags":["Pizza"],"userId":166,
                 "image":"https://cdn.dummyjson.com/recipe-images/1.webp","rating":4.6,"reviewCount":98,"mealType":["Dinner"]},
                {"id":2}
            ],"total":50,"skip":0,"limit":30}"#,
        )
        .create_async()
        .await;

    let client = DummyJsonClient::new(http(), &server.url());
    let recipes = client.all_recipes().await.unwrap();
    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].total_time_minutes(), 35);
    assert_eq!(recipes[0].cuisine, "Italian");
    assert_eq!(recipes[1].name, "Unknown");
    assert_eq!(recipes[1].cuisine, "Various");
    assert_eq!(recipes[1].servings, 1);
}

#[tokio::test]
async fn test_unreachable_host_is_offline() {
    // Port 9 (discard) is not listening in test environments.
    let client = DummyJsonClient::new(http(), "http://127.0.0.1:9");
    let err = client.all_recipes().await.unwrap_err();
    assert!(err.is_offline(), "unexpected error {:?}", err);
}

#[tokio::test]
async fn test_timeout_error_hides_api_key() {
    // Accepts connections but never answers.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let silent = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let http = HttpClient::new(true, Duration::from_millis(200)).unwrap();
    let client = SpoonacularClient::new(http, &format!("http://{}", addr), "very-secret-key");
    let err = client.random_recipes(20).await.unwrap_err();
    silent.abort();

    assert!(matches!(err, ClientError::Timeout(_)), "unexpected error {:?}", err);
    let message = err.to_string();
    assert!(!message.contains("very-secret-key"), "{}", message);
    assert!(message.contains("/recipes/random"), "{}", message);
}
