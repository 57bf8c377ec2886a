use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use log::debug;
use regex::Regex;

/// Expected outputs, geometry files and traces checked into the crate
pub const TESTDATA_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata");

pub struct TestCasePaths {
    pub config: PathBuf,
    pub trace: PathBuf,
    pub output: PathBuf,
}

/// Finds every case under a testdata directory
///
/// Each `outputs/output-<trace>-<config>.json` pairs `traces/<trace>.trace` with
/// `configs/<config>.json`. Cases are sorted by output file name
pub fn get_configs<P: AsRef<Path>>(testdata: P) -> Result<Vec<TestCasePaths>, Box<dyn Error>> {
    let testdata = testdata.as_ref();
    let mut out = Vec::new();
    let output_pattern = Regex::new(r"^output-(?P<trace>[0-9a-zA-Z_]+)-(?P<config>[0-9a-zA-Z_]+)\.json$")?;
    let mut files = Vec::new();
    for entry in fs::read_dir(testdata.join("outputs"))? {
        let file_name = entry?
            .file_name()
            .into_string()
            .map_err(|e| format!("Can't convert OS string ({e:?}) to standard string"))?;
        if output_pattern.is_match(&file_name) {
            files.push(file_name);
        }
    }
    files.sort();
    for file_name in files {
        debug!("Found test case {file_name}");
        // Get components of name
        let tokens = output_pattern.captures(&file_name).ok_or("Couldn't parse the file name".to_string())?;
        let trace = tokens.name("trace").ok_or("Couldn't get the trace file from the output file name".to_string())?.as_str();
        let config = tokens.name("config").ok_or("Couldn't get the config file from the output file name".to_string())?.as_str();
        out.push(TestCasePaths {
            config: testdata.join("configs").join(format!("{config}.json")),
            trace: testdata.join("traces").join(format!("{trace}.trace")),
            output: testdata.join("outputs").join(&file_name),
        })
    }
    Ok(out)
}
