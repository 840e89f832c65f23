//! Byte-level class file construction shared by this crate's own tests and by
//! `teenyjvm-runtime`'s handler tests, which need a real `ClassFile` to build
//! an `ExecCtx` around without hand-writing the constant pool every time.

fn push_utf8(buf: &mut Vec<u8>, s: &str) {
    buf.push(1); // CONSTANT_Utf8
    buf.extend_from_slice(&(s.len() as u16).to_be_bytes());
    buf.extend_from_slice(s.as_bytes());
}

/// A minimal but real class file: constant pool with `main`'s name and
/// descriptor UTF8 entries plus a `Code` UTF8 entry, no fields, one method
/// carrying the given code bytes.
pub fn build_minimal_class(code: &[u8], max_stack: u16, max_locals: u16) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&0xCAFEBABEu32.to_be_bytes());
    buf.extend_from_slice(&0u16.to_be_bytes()); // minor
    buf.extend_from_slice(&52u16.to_be_bytes()); // major (Java 8)

    buf.extend_from_slice(&4u16.to_be_bytes()); // constant pool count = max_index + 1
    push_utf8(&mut buf, "main");
    push_utf8(&mut buf, "([Ljava/lang/String;)V");
    push_utf8(&mut buf, "Code");

    buf.extend_from_slice(&0u16.to_be_bytes()); // access_flags
    buf.extend_from_slice(&0u16.to_be_bytes()); // this_class
    buf.extend_from_slice(&0u16.to_be_bytes()); // super_class
    buf.extend_from_slice(&0u16.to_be_bytes()); // interfaces_count
    buf.extend_from_slice(&0u16.to_be_bytes()); // fields_count

    buf.extend_from_slice(&1u16.to_be_bytes()); // methods_count
    buf.extend_from_slice(&0u16.to_be_bytes()); // access_flags
    buf.extend_from_slice(&1u16.to_be_bytes()); // name_index -> "main"
    buf.extend_from_slice(&2u16.to_be_bytes()); // descriptor_index
    buf.extend_from_slice(&1u16.to_be_bytes()); // attributes_count

    buf.extend_from_slice(&3u16.to_be_bytes()); // attribute_name_index -> "Code"
    let code_attr_len = 2 + 2 + 4 + code.len() + 2 + 2;
    buf.extend_from_slice(&(code_attr_len as u32).to_be_bytes());
    buf.extend_from_slice(&max_stack.to_be_bytes());
    buf.extend_from_slice(&max_locals.to_be_bytes());
    buf.extend_from_slice(&(code.len() as u32).to_be_bytes());
    buf.extend_from_slice(code);
    buf.extend_from_slice(&0u16.to_be_bytes()); // exception_table_length
    buf.extend_from_slice(&0u16.to_be_bytes()); // attributes_count (of Code)

    buf
}

/// A method to splice into [`build_class`]: name, descriptor, and code, with
/// `max_stack`/`max_locals` generous enough for small test programs.
pub struct MethodSpec<'a> {
    pub name: &'a str,
    pub descriptor: &'a str,
    pub max_stack: u16,
    pub max_locals: u16,
    pub code: &'a [u8],
}

/// A class file carrying several methods, for exercising `invokestatic`.
/// Every method's name/descriptor becomes its own constant pool UTF8 entry;
/// there is one shared `Code` entry. Since this subset resolves
/// `invokestatic` by `cp_index % methods.len()`
/// ([`crate::ClassFile::find_method_by_cp_index`]), callers pick whichever
/// index they like as long as it lands on the right method modulo the
/// method count.
pub fn build_class(methods: &[MethodSpec]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&0xCAFEBABEu32.to_be_bytes());
    buf.extend_from_slice(&0u16.to_be_bytes());
    buf.extend_from_slice(&52u16.to_be_bytes());

    // index 0 is entry 1 (1-indexed pool); 2 entries per method + 1 "Code" entry.
    let pool_count = 2 * methods.len() as u16 + 1 + 1;
    buf.extend_from_slice(&pool_count.to_be_bytes());
    for m in methods {
        push_utf8(&mut buf, m.name);
        push_utf8(&mut buf, m.descriptor);
    }
    let code_name_index = 2 * methods.len() as u16 + 1;
    push_utf8(&mut buf, "Code");

    buf.extend_from_slice(&0u16.to_be_bytes()); // access_flags
    buf.extend_from_slice(&0u16.to_be_bytes()); // this_class
    buf.extend_from_slice(&0u16.to_be_bytes()); // super_class
    buf.extend_from_slice(&0u16.to_be_bytes()); // interfaces_count
    buf.extend_from_slice(&0u16.to_be_bytes()); // fields_count

    buf.extend_from_slice(&(methods.len() as u16).to_be_bytes());
    for (i, m) in methods.iter().enumerate() {
        let name_index = 2 * i as u16 + 1;
        let descriptor_index = 2 * i as u16 + 2;
        buf.extend_from_slice(&0u16.to_be_bytes()); // access_flags
        buf.extend_from_slice(&name_index.to_be_bytes());
        buf.extend_from_slice(&descriptor_index.to_be_bytes());
        buf.extend_from_slice(&1u16.to_be_bytes()); // attributes_count

        buf.extend_from_slice(&code_name_index.to_be_bytes());
        let code_attr_len = 2 + 2 + 4 + m.code.len() + 2 + 2;
        buf.extend_from_slice(&(code_attr_len as u32).to_be_bytes());
        buf.extend_from_slice(&m.max_stack.to_be_bytes());
        buf.extend_from_slice(&m.max_locals.to_be_bytes());
        buf.extend_from_slice(&(m.code.len() as u32).to_be_bytes());
        buf.extend_from_slice(m.code);
        buf.extend_from_slice(&0u16.to_be_bytes()); // exception_table_length
        buf.extend_from_slice(&0u16.to_be_bytes()); // attributes_count (of Code)
    }

    buf
}
