use std::process::ExitCode;

use teenyjvm_class::ClassFile;
use teenyjvm_runtime::{execute, Handler, Heap, TrapError};

const ENTRY_NAME: &str = "main";
const ENTRY_DESCRIPTOR: &str = "([Ljava/lang/String;)V";

/// Exit codes, per the contract: 0 a clean run, 1 a CLI usage error, 99 any
/// runtime failure (malformed class file or a trap during execution).
const EXIT_USAGE: u8 = 1;
const EXIT_RUNTIME_FAILURE: u8 = 99;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let path = match (args.next(), args.next()) {
        (Some(path), None) => path,
        _ => {
            eprintln!("usage: teenyjvm <path-to-class-file>");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("teenyjvm: {message}");
            ExitCode::from(EXIT_RUNTIME_FAILURE)
        }
    }
}

fn run(path: &str) -> Result<(), String> {
    let bytes = std::fs::read(path).map_err(|e| format!("{path}: {e}"))?;
    let class = ClassFile::parse(&bytes).map_err(|e| e.to_string())?;

    let method = class
        .find_method(ENTRY_NAME, ENTRY_DESCRIPTOR)
        .ok_or(TrapError::MissingEntryPoint)
        .map_err(|e| e.to_string())?;

    let locals = vec![0i32; method.code.max_locals as usize];
    let handler = Handler::new();
    let mut heap = Heap::new();

    match execute(&handler, method, locals, &class, &mut heap) {
        Ok(None) => Ok(()),
        Ok(Some(_)) => Err(TrapError::NonVoidMainReturn.to_string()),
        Err(trap) => Err(trap.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teenyjvm_class::testing::build_minimal_class;

    #[test]
    fn rejects_missing_class_file() {
        let err = run("/nonexistent/path/does-not-exist.class").unwrap_err();
        assert!(err.contains("does-not-exist.class"));
    }

    #[test]
    fn runs_a_minimal_void_main() {
        let tmp = std::env::temp_dir().join("teenyjvm-cli-test-minimal.class");
        let bytes = build_minimal_class(&[0xb1], 1, 1);
        std::fs::write(&tmp, &bytes).unwrap();
        let result = run(tmp.to_str().unwrap());
        std::fs::remove_file(&tmp).ok();
        assert!(result.is_ok());
    }
}
