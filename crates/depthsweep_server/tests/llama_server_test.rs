//! Live tests against a real `llama-server`.
//!
//! Set `DEPTHSWEEP_TEST_MODEL` to a GGUF path or repository and run with
//! `--features api`.

use depthsweep_core::{Conversation, FieldSource, ModelId, Segment};
use depthsweep_interface::{LanguageModel, LoadOptions, ModelLoader};
use depthsweep_server::{LlamaServerLauncher, ServerConfigBuilder};

fn test_model() -> ModelId {
    ModelId::new(
        std::env::var("DEPTHSWEEP_TEST_MODEL")
            .expect("DEPTHSWEEP_TEST_MODEL must name a model to serve"),
    )
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_constrained_slots() {
    let config = ServerConfigBuilder::default().port(18080u16).build().unwrap();
    let launcher = LlamaServerLauncher::new(config);
    let model = launcher
        .load(&test_model(), &LoadOptions::default())
        .await
        .expect("server should start");

    let conversation = Conversation::builder()
        .system("You are a careful reader.")
        .user("Rate how much you like rainy days, then sunny days, from 1 to 5.")
        .assistant(vec![
            Segment::text("Rainy: "),
            Segment::slot("rainy", "[1-5]", 0.0),
            Segment::text("\nSunny: "),
            Segment::slot("sunny", "[1-5]", 1.0),
        ])
        .build()
        .unwrap();

    let fields = model.run(&conversation).await.expect("generation should succeed");
    for name in ["rainy", "sunny"] {
        let value = fields.field(name).expect("slot should be filled");
        assert_eq!(value.len(), 1);
        assert!(('1'..='5').contains(&value.chars().next().unwrap()));
    }

    model.unload().await.expect("server should stop");
}
