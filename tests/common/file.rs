use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: Vec<u8>,
}

pub fn write_file(file_spec: FileSpec) {
    // make sure the parent directory exists
    if let Some(parent) = file_spec.path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", parent, e));
    }

    std::fs::write(&file_spec.path, &file_spec.content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", file_spec.path, e));
}

/// Write small scripts with generated names and content into `dir`
pub fn write_generated_scripts(dir: &Path, files_count: usize) -> Vec<FileSpec> {
    use fake::{
        Fake,
        faker::lorem::en::{Word, Words},
    };

    (0..files_count)
        .map(|i| {
            let file_name = format!("{}-{}.js", Word().fake::<String>(), i);
            let file_path = dir.join(&file_name);
            let file_content = format!(
                "console.log({:?});",
                Words(5..10).fake::<Vec<String>>().join(" ")
            );

            let file_spec = FileSpec::new(file_path, file_content.into_bytes());
            write_file(file_spec.clone());

            file_spec
        })
        .collect::<Vec<_>>()
}

/// JavaScript-looking text truncated to `len` bytes
pub fn script_blob(len: usize) -> Vec<u8> {
    let mut text = String::with_capacity(len + 80);
    let mut i = 0;
    while text.len() < len {
        text.push_str(&format!(
            "function handler{i}(event) {{ return event.detail * {} + offset[{}]; }}\n",
            i * 7 + 3,
            i % 5
        ));
        i += 1;
    }
    text.truncate(len);
    text.into_bytes()
}

/// Overwrite `count` bytes in the middle of `data`
pub fn mutate_middle(data: &[u8], count: usize) -> Vec<u8> {
    let mut mutated = data.to_vec();
    let middle = mutated.len() / 2;
    for byte in &mut mutated[middle..middle + count] {
        *byte = if *byte == b'X' { b'Y' } else { b'X' };
    }
    mutated
}
