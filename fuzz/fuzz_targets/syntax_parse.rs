#![no_main]

use libfuzzer_sys::fuzz_target;

const MAX_SOURCE_BYTES: usize = 4096;

fn decode_source(bytes: &[u8]) -> String {
    let capped = &bytes[..bytes.len().min(MAX_SOURCE_BYTES)];
    String::from_utf8_lossy(capped).into_owned()
}

fuzz_target!(|data: &[u8]| {
    let source = decode_source(data);
    let parsed = codedoc_syntax::parse(&source);

    // The tree is lossless, errors included.
    assert_eq!(parsed.syntax().text().to_string(), source);
    for error in parsed.errors() {
        assert!(usize::from(error.range.end()) <= source.len());
    }

    let lexed: usize = codedoc_syntax::lex(&source)
        .iter()
        .map(|token| usize::from(token.range.len()))
        .sum();
    assert_eq!(lexed, source.len());
});
