//! Voice delivery routing and its best-effort error policy.

mod common;

use anime_tts::messaging::{DeliveryError, Message, MessagingError, VoiceDelivery};
use anime_tts::ChatType;
use common::{RecordingBackend, Sent};

#[tokio::test]
async fn test_private_chat_key_sends_private_message() {
    let backend = RecordingBackend::new();
    let delivery = VoiceDelivery::new(backend.clone());

    let receipt = delivery
        .try_deliver("onebot-private_12345", "https://x/y.wav")
        .await
        .unwrap();
    assert_eq!(receipt.chat_key.chat_type, ChatType::Private);
    assert_eq!(receipt.message_id, Some(1));
    assert_eq!(
        backend.sent(),
        vec![Sent::Private(12345, Message::voice("https://x/y.wav"))]
    );
}

#[tokio::test]
async fn test_group_chat_key_sends_group_message() {
    let backend = RecordingBackend::new();
    let delivery = VoiceDelivery::new(backend.clone());

    delivery.deliver("onebot-group_987654", "/tmp/voice.wav").await;
    assert_eq!(
        backend.sent(),
        vec![Sent::Group(987654, Message::voice("/tmp/voice.wav"))]
    );
}

#[tokio::test]
async fn test_malformed_chat_keys_never_reach_backend() {
    let backend = RecordingBackend::new();
    let delivery = VoiceDelivery::new(backend.clone());

    let cases = [
        ("onebot-private12345", "invalid_chat_key"),
        ("private_12345", "invalid_chat_key"),
        ("onebot-private_abc", "invalid_target_id"),
        ("onebot-channel_123", "unsupported_chat_type"),
    ];
    for (key, category) in cases {
        let err = delivery.try_deliver(key, "https://x/y.wav").await.unwrap_err();
        assert_eq!(err.category(), category, "chat key {key}");
        // The outer boundary swallows the same failure.
        delivery.deliver(key, "https://x/y.wav").await;
    }
    assert!(backend.sent().is_empty());
}

#[tokio::test]
async fn test_backend_rejection_is_swallowed() {
    let backend = RecordingBackend::failing(MessagingError::ActionFailed {
        retcode: Some(100),
        message: "blocked".into(),
    });
    let delivery = VoiceDelivery::new(backend.clone());

    let err = delivery
        .try_deliver("onebot-group_1", "https://x/y.wav")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DeliveryError::MessagingApi {
            retcode: Some(100),
            message: "blocked".into()
        }
    );

    delivery.deliver("onebot-group_1", "https://x/y.wav").await;
    assert_eq!(backend.sent().len(), 2);
}

#[tokio::test]
async fn test_backend_transport_failure_is_unexpected() {
    let backend = RecordingBackend::failing(MessagingError::Transport("connection refused".into()));
    let delivery = VoiceDelivery::new(backend);

    let err = delivery
        .try_deliver("onebot-private_7", "https://x/y.wav")
        .await
        .unwrap_err();
    assert_eq!(err, DeliveryError::Unexpected("connection refused".into()));
}

mod panicking {
    use anime_tts::messaging::{
        Message, MessageReceipt, MessagingBackend, MessagingError, VoiceDelivery,
    };
    use async_trait::async_trait;
    use std::sync::Arc;

    struct PanickingBackend;

    #[async_trait]
    impl MessagingBackend for PanickingBackend {
        async fn send_private_msg(
            &self,
            _user_id: u64,
            _message: &Message,
        ) -> Result<MessageReceipt, MessagingError> {
            panic!("gateway exploded");
        }

        async fn send_group_msg(
            &self,
            _group_id: u64,
            _message: &Message,
        ) -> Result<MessageReceipt, MessagingError> {
            panic!("gateway exploded");
        }
    }

    #[tokio::test]
    async fn test_backend_panic_is_contained() {
        let delivery = VoiceDelivery::new(Arc::new(PanickingBackend));
        let err = delivery
            .try_deliver("onebot-private_7", "https://x/y.wav")
            .await
            .unwrap_err();
        assert_eq!(err.category(), "unexpected");
        assert!(err.to_string().contains("gateway exploded"));

        delivery.deliver("onebot-group_7", "https://x/y.wav").await;
    }
}
