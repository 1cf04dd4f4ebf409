//! End-to-end few-shot prompt assembly tests
//!
//! Exercises the full flow: example records -> (optional) semantic selection
//! -> per-example formatting -> concatenation into the final message
//! sequence a chat model would consume.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use promptkit::example_selectors::{Example, SemanticSimilarityExampleSelector};
use promptkit::messages::Message;
use promptkit::prompts::{ChatPromptTemplate, FewShotChatMessagePromptTemplate};
use promptkit::testing::FakeEmbeddings;
use promptkit::vector_stores::InMemoryVectorStore;
use std::collections::HashMap;
use std::sync::Arc;

fn example(pairs: &[(&str, &str)]) -> Example {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn arithmetic_examples() -> Vec<Example> {
    vec![
        example(&[("input", "2+2"), ("output", "4")]),
        example(&[("input", "2+3"), ("output", "5")]),
    ]
}

fn example_prompt() -> ChatPromptTemplate {
    ChatPromptTemplate::from_messages(vec![("human", "{input}"), ("ai", "{output}")]).unwrap()
}

#[tokio::test]
async fn static_few_shot_assembly() {
    let few_shot =
        FewShotChatMessagePromptTemplate::from_examples(example_prompt(), arithmetic_examples());

    let final_prompt = ChatPromptTemplate::from_messages(vec![(
        "system",
        "You are a wondrous wizard of math.",
    )])
    .unwrap()
        + few_shot
        + ChatPromptTemplate::from_messages(vec![("human", "{input}")]).unwrap();

    let mut values = HashMap::new();
    values.insert("input".to_string(), "What is 4+4?".to_string());

    let messages = final_prompt.format_messages(&values).await.unwrap();

    // system + 2 examples * 2 messages + trailing human
    assert_eq!(messages.len(), 6);
    assert!(messages[0].is_system());
    assert_eq!(messages[1].as_text(), "2+2");
    assert_eq!(messages[2].as_text(), "4");
    assert_eq!(messages[3].as_text(), "2+3");
    assert_eq!(messages[4].as_text(), "5");
    assert_eq!(messages[5].as_text(), "What is 4+4?");
}

#[tokio::test]
async fn selector_backed_assembly() {
    let examples = vec![
        example(&[("input", "happy happy joy"), ("output", "cheerful mood")]),
        example(&[("input", "2+2"), ("output", "4")]),
        example(&[("input", "storm clouds rain"), ("output", "gloomy weather")]),
        example(&[("input", "2+3"), ("output", "5")]),
    ];

    let store = InMemoryVectorStore::new(Arc::new(FakeEmbeddings::new()));
    let selector = SemanticSimilarityExampleSelector::from_examples(examples, store, 2)
        .await
        .unwrap();

    let few_shot =
        FewShotChatMessagePromptTemplate::with_selector(example_prompt(), Arc::new(selector));

    let final_prompt = ChatPromptTemplate::from_messages(vec![("system", "You are helpful.")])
        .unwrap()
        + few_shot
        + ChatPromptTemplate::from_messages(vec![("human", "{input}")]).unwrap();

    let values: HashMap<String, String> =
        HashMap::from([("input".to_string(), "2+2".to_string())]);

    let messages = final_prompt.format_messages(&values).await.unwrap();

    // system + 2 selected examples * 2 messages + trailing human
    assert_eq!(messages.len(), 6);

    // The exact-match arithmetic example must be the closest hit
    assert_eq!(messages[1].as_text(), "2+2");
    assert_eq!(messages[2].as_text(), "4");
    assert_eq!(messages[5].as_text(), "2+2");
}

#[tokio::test]
async fn assembly_is_associative() {
    let make_parts = || {
        let system =
            ChatPromptTemplate::from_messages(vec![("system", "You are helpful.")]).unwrap();
        let few_shot: ChatPromptTemplate = FewShotChatMessagePromptTemplate::from_examples(
            example_prompt(),
            arithmetic_examples(),
        )
        .into();
        let trailing = ChatPromptTemplate::from_messages(vec![("human", "{input}")]).unwrap();
        (system, few_shot, trailing)
    };

    let values: HashMap<String, String> =
        HashMap::from([("input".to_string(), "What is 9-4?".to_string())]);

    let (a, b, c) = make_parts();
    let left = (a + b) + c;
    let (a, b, c) = make_parts();
    let right = a + (b + c);

    let left_messages = left.format_messages(&values).await.unwrap();
    let right_messages = right.format_messages(&values).await.unwrap();
    assert_eq!(left_messages, right_messages);
}

#[tokio::test]
async fn malformed_example_fails_assembly() {
    let examples = vec![
        example(&[("input", "2+2"), ("output", "4")]),
        example(&[("input", "2+3")]), // missing "output"
    ];
    let few_shot = FewShotChatMessagePromptTemplate::from_examples(example_prompt(), examples);

    let final_prompt = ChatPromptTemplate::from_messages(vec![("system", "S")]).unwrap()
        + few_shot
        + ChatPromptTemplate::from_messages(vec![("human", "{input}")]).unwrap();

    let values: HashMap<String, String> =
        HashMap::from([("input".to_string(), "q".to_string())]);

    let err = final_prompt.format_messages(&values).await.unwrap_err();
    assert!(err.to_string().contains("output"));
}

#[tokio::test]
async fn static_messages_compose_with_templates() {
    let prompt = ChatPromptTemplate::from_messages(vec![("system", "S")]).unwrap()
        + Message::human("fixed question");
    let messages = prompt.format_messages(&HashMap::new()).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].as_text(), "fixed question");
}
