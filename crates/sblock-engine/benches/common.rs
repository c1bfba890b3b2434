// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with some content.\n\n- Bullet point\n  - Nested item\n- Another item\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_block_document(sections: usize) -> String {
    let mut content = String::new();

    for section in 0..sections {
        content.push_str(&format!("# Section {section}\n\n"));
        content.push_str(&format!(
            "::card title=\"Card {section}\" bordered\nSome paragraph content with **bold** text.\n\n"
        ));
        content.push_str("::grid 3\n");
        for i in 0..3 {
            content.push_str(&format!("::info\n- Item {i}\n::end\n"));
        }
        content.push_str("::end\n");
        content.push_str("```\n::not-a-block\n```\n");
        content.push_str("::btn primary [Go](https://example.com)\n::end\n");
        content.push_str("::end\n\n");
    }

    content
}

#[allow(dead_code)]
pub fn generate_nested_blocks(depth: usize) -> String {
    let mut content = String::new();
    for level in 0..depth {
        content.push_str(&format!("::level-{level}\nText at level {level}\n"));
    }
    for _ in 0..depth {
        content.push_str("::end\n");
    }
    content
}
