use section_chunker::Chunker;

fn main() {
    let markdown = r#"
# ĐÁNH GIÁ KHẢ NĂNG CHỊU MẶN

## Salt tolerance of rice breeding lines

Salinity intrusion in the Mekong Delta reduces yield every dry season. This study
screens breeding lines derived from crosses between aromatic donors and tolerant
landraces, scoring seedlings in hydroponic culture.

## Abstract

Short abstract.

## 1. Materials

The material comprised Jasmine 85 as the susceptible check and Pokkali as the
tolerant check, together with forty breeding lines from the 2019 crossing block.

- Jasmine 85, susceptible check
- Pokkali, tolerant check
- OM lines, forty entries

## 2. Methods

Seedlings were grown in Yoshida solution and salinized at fourteen days after sowing.

```python
def ec_to_salinity(ec):
    # dS/m to grams per litre
    return ec * 0.64
```

| Treatment | EC (dS/m) |
|-----------|-----------|
| Control   | 0         |
| Stress    | 12        |
"#;

    println!("Chunking markdown document...\n");

    // "Abstract" is under 10 words, so it folds into "1. Materials"
    let chunker = Chunker::builder()
        .max_tokens(20)
        .overlap(5)
        .min_tokens(10)
        .build()
        .expect("overlap is smaller than the window");
    let chunks = chunker.chunk(markdown);

    println!("Generated {} chunks:\n", chunks.len());
    println!("{}", "=".repeat(80));

    for chunk in &chunks {
        println!("[{}] {} | {}", chunk.chunk_id, chunk.doc_title, chunk.section);
        println!("{}", chunk.content);
        println!("{}", "-".repeat(80));
    }

    let merged: Vec<&str> = chunks
        .iter()
        .map(|c| c.section.as_str())
        .filter(|s| s.contains(" + "))
        .collect();
    if let Some(heading) = merged.first() {
        println!("Merged section: {heading}");
    }
}
