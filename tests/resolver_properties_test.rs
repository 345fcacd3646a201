// 解析器性质测试：内容类型判定与上传字节透传
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use bytes::Bytes;
use image_intake::image_source::{
    ImageSourceResolver, RawInput, ResolutionError, ResolutionOutcome, ResolverConfig,
    is_image_content_type,
};
use once_cell::sync::Lazy;
use proptest::prelude::*;
use tokio::runtime::Runtime;

static RUNTIME: Lazy<Runtime> = Lazy::new(|| Runtime::new().expect("runtime init failed"));
static RESOLVER: Lazy<ImageSourceResolver> =
    Lazy::new(|| ImageSourceResolver::new(ResolverConfig::default()).expect("resolver init failed"));

fn flip_case(text: &str, mask: u64) -> String {
    text.chars()
        .enumerate()
        .map(|(i, c)| {
            if mask & (1 << (i % 64)) != 0 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn non_image_media_types_are_rejected(
        media in "[a-z]{1,10}/[a-z0-9.+-]{1,12}",
        params in proptest::option::of("; ?[a-z]{1,8}=[a-z0-9-]{1,8}"),
    ) {
        prop_assume!(!media.starts_with("image/"));
        let declared = format!("{}{}", media, params.unwrap_or_default());

        prop_assert!(!is_image_content_type(&declared));
    }

    #[test]
    fn image_media_types_are_accepted_in_any_case(
        subtype in "[a-z0-9.+-]{1,12}",
        mask in any::<u64>(),
    ) {
        let declared = flip_case(&format!("image/{}", subtype), mask);

        prop_assert!(is_image_content_type(&declared));
    }

    #[test]
    fn uploads_resolve_to_identical_bytes(
        payload in proptest::collection::vec(any::<u8>(), 0..2048),
        stem in "[a-z]{1,8}",
        ext in prop::sample::select(vec!["jpg", "jpeg", "png", "gif", "bmp", "webp"]),
    ) {
        let input = RawInput::UploadFile {
            filename: format!("{}.{}", stem, ext),
            bytes: Bytes::from(payload.clone()),
        };

        let outcome = RUNTIME.block_on(RESOLVER.resolve(input, false));

        match outcome {
            Some(ResolutionOutcome::Resolved(artifact)) => {
                prop_assert_eq!(artifact.bytes().as_ref(), payload.as_slice());
            }
            other => prop_assert!(false, "upload should always resolve, got {:?}", other),
        }
    }
}

/// 启动只应答一次的本地服务：给定内容类型 + 无法解码的响应体。
fn serve_once(content_type: &'static str) -> (u16, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server failed");
    let port = listener.local_addr().expect("read local addr failed").port();

    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept failed");
        let mut req_buf = [0u8; 2048];
        let _ = stream.read(&mut req_buf);

        let body = b"%PDF-1.4 definitely not decodable as an image";
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            content_type,
            body.len()
        );
        let _ = stream.write_all(head.as_bytes());
        let _ = stream.write_all(body);
        let _ = stream.flush();
    });

    (port, server)
}

#[tokio::test]
async fn declared_non_image_types_never_reach_decode() {
    let resolver = ImageSourceResolver::new(ResolverConfig::default()).expect("resolver init failed");

    for content_type in ["text/html", "application/pdf", "application/octet-stream", "TEXT/PLAIN; charset=utf-8"] {
        let (port, server) = serve_once(content_type);

        let outcome = resolver
            .resolve(
                RawInput::EnterUrl {
                    url: format!("http://127.0.0.1:{}/doc", port),
                },
                false,
            )
            .await;

        server.join().expect("server thread failed");

        assert_eq!(
            outcome,
            Some(ResolutionOutcome::Failed(ResolutionError::NotAnImage(content_type.to_string()))),
            "content type {content_type}"
        );
    }
}
