#![no_main]

use codedoc_ide::{
    all_comments, code_range, extract_declarations, folding_ranges, function_code,
    strip_all_comments, Dialect, ExtractOptions, ParseScope,
};
use libfuzzer_sys::fuzz_target;

const MAX_SOURCE_BYTES: usize = 4096;

fn decode_source(bytes: &[u8]) -> String {
    let capped = &bytes[..bytes.len().min(MAX_SOURCE_BYTES)];
    String::from_utf8_lossy(capped).into_owned()
}

fuzz_target!(|data: &[u8]| {
    let Some((&seed, rest)) = data.split_first() else {
        return;
    };
    let source = decode_source(rest);

    let options = ExtractOptions {
        scope: if seed & 1 == 0 {
            ParseScope::WholeFile
        } else {
            ParseScope::Selection {
                start_line: u32::from(seed >> 2),
            }
        },
        inline_comments: seed & 2 == 0,
        header_comments: seed & 1 == 1,
    };
    if let Ok(declarations) = extract_declarations(&source, &options) {
        for declaration in &declarations {
            let lines = declaration.buffer_lines();
            assert!(lines.start <= lines.end);
            let _ = function_code(&source, declaration);
        }
    }

    let _ = all_comments(&source, Dialect::JavaScript);
    let _ = all_comments(&source, Dialect::Template);
    let _ = folding_ranges(&source);
    let _ = code_range(&source, u32::from(seed), u32::from(seed) + 3);

    for dialect in [Dialect::JavaScript, Dialect::Template] {
        let once = strip_all_comments(&source, dialect);
        assert_eq!(strip_all_comments(&once, dialect), once);
    }
});
