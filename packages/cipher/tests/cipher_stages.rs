//! AEAD stage behaviour: round trips, nonce freshness, rejection of bad input

use duplex_cipher::cipher::envelope::{HEADER_LEN, TAG_LEN};
use duplex_cipher::{
    AesGcmStage, ChaChaStage, CipherAlgorithm, KEY_LEN, SecretKey, Stage, StageKind,
    TransformError, cipher_stage,
};
use proptest::prelude::*;

fn key(byte: u8) -> SecretKey {
    SecretKey::from_bytes(vec![byte; KEY_LEN]).expect("32-byte key is valid")
}

fn both(key: &SecretKey) -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(AesGcmStage::new(key).expect("aes stage")),
        Box::new(ChaChaStage::new(key).expect("chacha stage")),
    ]
}

#[test]
fn test_roundtrip_hello_world() {
    let key = key(7);
    for stage in both(&key) {
        let sealed = stage.forward(b"Hello World").expect("encrypt");
        assert_eq!(sealed.len(), HEADER_LEN + b"Hello World".len() + TAG_LEN);
        assert_eq!(stage.inverse(&sealed).expect("decrypt"), b"Hello World");
    }
}

#[test]
fn test_roundtrip_empty_and_binary() {
    let key = key(1);
    let binary: Vec<u8> = (0..=255u8).rev().cycle().take(5000).collect();
    for stage in both(&key) {
        let sealed = stage.forward(b"").expect("encrypt empty");
        assert_eq!(sealed.len(), HEADER_LEN + TAG_LEN);
        assert_eq!(stage.inverse(&sealed).expect("decrypt empty"), b"");

        let sealed = stage.forward(&binary).expect("encrypt binary");
        assert_eq!(stage.inverse(&sealed).expect("decrypt binary"), binary);
    }
}

#[test]
fn test_same_plaintext_never_produces_same_ciphertext() {
    let key = key(3);
    for stage in both(&key) {
        let first = stage.forward(b"Hello World").expect("encrypt");
        let second = stage.forward(b"Hello World").expect("encrypt");
        assert_ne!(first, second, "{} reused a nonce", stage.name());
    }
}

#[test]
fn test_wrong_key_fails_authentication() {
    let sender = key(1);
    let receiver = key(2);
    let pairs: Vec<(Box<dyn Stage>, Box<dyn Stage>)> = vec![
        (
            Box::new(AesGcmStage::new(&sender).expect("aes")),
            Box::new(AesGcmStage::new(&receiver).expect("aes")),
        ),
        (
            Box::new(ChaChaStage::new(&sender).expect("chacha")),
            Box::new(ChaChaStage::new(&receiver).expect("chacha")),
        ),
    ];
    for (seal, open) in pairs {
        let sealed = seal.forward(b"secret payload").expect("encrypt");
        assert!(matches!(
            open.inverse(&sealed),
            Err(TransformError::AuthenticationFailed(_))
        ));
    }
}

#[test]
fn test_any_flipped_byte_fails_authentication() {
    let key = key(9);
    let stage = AesGcmStage::new(&key).expect("aes");
    let sealed = stage.forward(b"tamper evident").expect("encrypt");
    for i in 0..sealed.len() {
        let mut damaged = sealed.clone();
        damaged[i] ^= 0x01;
        assert!(
            matches!(stage.inverse(&damaged), Err(TransformError::AuthenticationFailed(_))),
            "flip at byte {i} went unnoticed"
        );
    }
}

#[test]
fn test_truncated_envelope_fails_authentication() {
    let key = key(4);
    let stage = ChaChaStage::new(&key).expect("chacha");
    let sealed = stage.forward(b"short").expect("encrypt");
    for cut in 0..sealed.len() {
        assert!(matches!(
            stage.inverse(&sealed[..cut]),
            Err(TransformError::AuthenticationFailed(_))
        ));
    }
}

#[test]
fn test_algorithm_mismatch_is_rejected() {
    let key = key(5);
    let aes = AesGcmStage::new(&key).expect("aes");
    let chacha = ChaChaStage::new(&key).expect("chacha");
    let sealed = aes.forward(b"cross").expect("encrypt");
    assert!(matches!(
        chacha.inverse(&sealed),
        Err(TransformError::AuthenticationFailed(_))
    ));
}

#[test]
fn test_associated_data_must_match() {
    let key = key(6);
    let channel_a = AesGcmStage::new(&key).expect("aes").with_aad("channel-a");
    let channel_b = AesGcmStage::new(&key).expect("aes").with_aad("channel-b");
    let sealed = channel_a.forward(b"routed").expect("encrypt");
    assert_eq!(channel_a.inverse(&sealed).expect("decrypt"), b"routed");
    assert!(matches!(
        channel_b.inverse(&sealed),
        Err(TransformError::AuthenticationFailed(_))
    ));
}

#[test]
fn test_key_validation() {
    for len in [0, 16, 31, 33, 64] {
        assert!(matches!(
            SecretKey::from_bytes(vec![0u8; len]),
            Err(TransformError::InvalidKey(_))
        ));
    }
    let hex_key = "00".repeat(KEY_LEN);
    assert!(SecretKey::from_hex(&hex_key).is_ok());
    assert!(SecretKey::from_hex(&format!("  {hex_key}\n")).is_ok());
    assert!(matches!(SecretKey::from_hex("zz"), Err(TransformError::InvalidKey(_))));
    assert!(matches!(SecretKey::from_hex("abcd"), Err(TransformError::InvalidKey(_))));

    let b64_key = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";
    assert!(SecretKey::from_base64(b64_key).is_ok());
    assert!(matches!(
        SecretKey::from_base64("not base64!"),
        Err(TransformError::InvalidKey(_))
    ));
}

#[test]
fn test_key_debug_is_redacted() {
    let key = SecretKey::from_bytes(vec![0xAB; KEY_LEN]).expect("valid");
    let rendered = format!("{key:?}");
    assert_eq!(rendered, "SecretKey(REDACTED)");
    assert!(!rendered.to_lowercase().contains("ab"));

    let stage = AesGcmStage::new(&key).expect("aes");
    let rendered = format!("{stage:?}");
    assert!(!rendered.contains("171"), "stage debug leaked key bytes: {rendered}");
}

#[test]
fn test_generated_keys_differ() {
    let a = SecretKey::generate();
    let b = SecretKey::generate();
    assert_eq!(a.expose_secret().len(), KEY_LEN);
    assert_ne!(a.expose_secret(), b.expose_secret());
}

#[test]
fn test_factory_and_metadata() {
    let key = key(8);
    for &algorithm in CipherAlgorithm::all() {
        let stage = cipher_stage(algorithm, &key, Some(b"ctx")).expect("stage");
        assert_eq!(stage.kind(), StageKind::Cipher);
        assert_eq!(stage.name(), algorithm.stage_name());
        let sealed = stage.forward(b"factory").expect("encrypt");
        assert_eq!(sealed[0], algorithm.wire_id());
        assert_eq!(stage.inverse(&sealed).expect("decrypt"), b"factory");
    }
}

#[test]
fn test_algorithm_parsing() {
    assert_eq!("encrypt".parse::<CipherAlgorithm>().ok(), Some(CipherAlgorithm::Aes256Gcm));
    assert_eq!("AES".parse::<CipherAlgorithm>().ok(), Some(CipherAlgorithm::Aes256Gcm));
    assert_eq!(
        "chacha".parse::<CipherAlgorithm>().ok(),
        Some(CipherAlgorithm::ChaCha20Poly1305)
    );
    assert!("rot13".parse::<CipherAlgorithm>().is_err());
    assert_eq!(CipherAlgorithm::default(), CipherAlgorithm::Aes256Gcm);
    assert_eq!(CipherAlgorithm::from_wire_id(0x02), Some(CipherAlgorithm::ChaCha20Poly1305));
    assert_eq!(CipherAlgorithm::from_wire_id(0x7F), None);
}

fn assert_zeroize_on_drop<T: zeroize::ZeroizeOnDrop>() {}

#[test]
fn test_expanded_keys_are_zeroed_on_drop() {
    assert_zeroize_on_drop::<aes::Aes256>();
    assert_zeroize_on_drop::<chacha20poly1305::ChaCha20Poly1305>();
}

#[test]
fn test_size_helpers_describe_the_envelope() {
    let key = key(12);
    for &algorithm in CipherAlgorithm::all() {
        assert_eq!(algorithm.key_size(), KEY_LEN);
        assert_eq!(1 + algorithm.nonce_size(), HEADER_LEN);
        assert_eq!(algorithm.tag_size(), TAG_LEN);

        let stage = cipher_stage(algorithm, &key, None).expect("stage");
        let sealed = stage.forward(b"sized").expect("encrypt");
        assert_eq!(
            sealed.len(),
            1 + algorithm.nonce_size() + b"sized".len() + algorithm.tag_size()
        );

        let shortest = 1 + algorithm.nonce_size() + algorithm.tag_size();
        let empty = stage.forward(b"").expect("encrypt empty");
        assert_eq!(empty.len(), shortest);
        assert!(matches!(
            stage.inverse(&empty[..shortest - 1]),
            Err(TransformError::AuthenticationFailed(_))
        ));
    }
    assert!(matches!(
        duplex_cipher::cipher::envelope::Envelope::parse(&[]),
        Err(TransformError::AuthenticationFailed(_))
    ));
}

proptest! {
    #[test]
    fn prop_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let key = key(11);
        for stage in both(&key) {
            let sealed = stage.forward(&data).expect("encrypt");
            prop_assert_eq!(stage.inverse(&sealed).expect("decrypt"), data.clone());
        }
    }
}
