//! Drives the compiled `teenyjvm` binary against hand-assembled class files
//! covering each end-to-end scenario, the only way to observe what
//! `invokevirtual`'s `println` actually writes to stdout.

use std::process::Command;

use teenyjvm_class::testing::{build_class, build_minimal_class, MethodSpec};

const EXIT_RUNTIME_FAILURE: i32 = 99;

fn run_binary(label: &str, bytes: &[u8]) -> (String, i32) {
    let tmp = std::env::temp_dir().join(format!("teenyjvm-e2e-{label}.class"));
    std::fs::write(&tmp, bytes).unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_teenyjvm"))
        .arg(&tmp)
        .output()
        .unwrap();
    std::fs::remove_file(&tmp).ok();
    (
        String::from_utf8(output.stdout).unwrap(),
        output.status.code().unwrap(),
    )
}

#[test]
fn constant_add_prints_nine() {
    let code = [
        0x08, // iconst_5
        0x07, // iconst_4
        0x60, // iadd
        0xb2, 0, 0, // getstatic
        0xb6, 0, 0,    // invokevirtual
        0xb1, // return
    ];
    let bytes = build_minimal_class(&code, 2, 0);
    let (stdout, status) = run_binary("constant-add", &bytes);
    assert_eq!(stdout, "9\n");
    assert_eq!(status, 0);
}

#[test]
fn loop_sums_one_to_ten() {
    let code: [u8; 25] = [
        0x03, // iconst_0            (0)  sum = 0
        0x3b, // istore_0            (1)
        0x04, // iconst_1            (2)  counter = 1
        0x3c, // istore_1            (3)
        0x1a, // iload_0             (4)  <- loop_start
        0x1b, // iload_1             (5)
        0x60, // iadd                (6)
        0x3b, // istore_0            (7)
        0x84, 1, 1,    // iinc 1, 1     (8..10)
        0x1b, // iload_1             (11)
        0x10, 10, // bipush 10       (12..13)
        0xa4, 0xff, 0xf6, // if_icmple -10 -> pc 14 + (-10) = 4 (14..16)
        0x1a, // iload_0             (17)
        0xb2, 0, 0, // getstatic     (18..20)
        0xb6, 0, 0,    // invokevirtual (21..23)
        0xb1, // return              (24)
    ];
    let bytes = build_minimal_class(&code, 2, 2);
    let (stdout, status) = run_binary("loop-sum", &bytes);
    assert_eq!(stdout, "55\n");
    assert_eq!(status, 0);
}

#[test]
fn static_call_computes_square() {
    let main_code = [
        0x10, 7, // bipush 7
        0xb8, 0, 1, // invokestatic #1 -> sq (1 % 2 == 1)
        0xb2, 0, 0, // getstatic
        0xb6, 0, 0,    // invokevirtual
        0xb1, // return
    ];
    let sq_code = [
        0x1a, // iload_0
        0x1a, // iload_0
        0x68, // imul
        0xac, // ireturn
    ];
    let bytes = build_class(&[
        MethodSpec {
            name: "main",
            descriptor: "([Ljava/lang/String;)V",
            max_stack: 2,
            max_locals: 0,
            code: &main_code,
        },
        MethodSpec {
            name: "sq",
            descriptor: "(I)I",
            max_stack: 2,
            max_locals: 1,
            code: &sq_code,
        },
    ]);
    let (stdout, status) = run_binary("static-call", &bytes);
    assert_eq!(stdout, "49\n");
    assert_eq!(status, 0);
}

#[test]
fn array_round_trip_prints_stored_value() {
    let code = [
        0x10, 3, // bipush 3
        0xbc, 10,   // newarray int
        0x59, // dup
        0x03, // iconst_0
        0x10, 42,   // bipush 42
        0x4f, // iastore
        0x59, // dup
        0x03, // iconst_0
        0x2e, // iaload
        0xb2, 0, 0, // getstatic
        0xb6, 0, 0,    // invokevirtual
        0xb1, // return
    ];
    let bytes = build_minimal_class(&code, 4, 0);
    let (stdout, status) = run_binary("array-round-trip", &bytes);
    assert_eq!(stdout, "42\n");
    assert_eq!(status, 0);
}

#[test]
fn division_by_zero_traps_with_runtime_failure_exit_code() {
    let code = [
        0x04, // iconst_1
        0x03, // iconst_0
        0x6c, // idiv
        0xb1, // return
    ];
    let bytes = build_minimal_class(&code, 2, 0);
    let (stdout, status) = run_binary("division-by-zero", &bytes);
    assert_eq!(stdout, "");
    assert_eq!(status, EXIT_RUNTIME_FAILURE);
}

#[test]
fn negative_branch_offset_loop_runs_exact_iteration_count() {
    let code: [u8; 18] = [
        0x10, 3,    // bipush 3           (0..1)  counter = 3
        0x3b, // istore_0             (2)
        0x84, 0, 0xff, // iinc 0, -1   (3..5)  <- loop_start
        0x1a, // iload_0              (6)
        0x9d, 0xff, 0xfc, // ifgt -4 -> pc 7 + (-4) = 3 (7..9)
        0x1a, // iload_0              (10)
        0xb2, 0, 0, // getstatic      (11..13)
        0xb6, 0, 0,    // invokevirtual  (14..16)
        0xb1, // return               (17)
    ];
    let bytes = build_minimal_class(&code, 1, 1);
    let (stdout, status) = run_binary("negative-branch", &bytes);
    assert_eq!(stdout, "0\n");
    assert_eq!(status, 0);
}
