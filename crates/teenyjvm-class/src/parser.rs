use crate::error::ClassFileError;
use crate::model::{CodeAttribute, ConstantPoolEntry, Method};

/// A cursor over class-file bytes. All multi-byte fields in the `.class`
/// format are big-endian (JVMS 4.1).
pub(crate) struct Parser<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Parser<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ClassFileError> {
        let end = self
            .offset
            .checked_add(n)
            .ok_or(ClassFileError::UnexpectedEof)?;
        let slice = self
            .bytes
            .get(self.offset..end)
            .ok_or(ClassFileError::UnexpectedEof)?;
        self.offset = end;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, ClassFileError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, ClassFileError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, ClassFileError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn skip(&mut self, n: usize) -> Result<(), ClassFileError> {
        self.take(n)?;
        Ok(())
    }

    pub fn read_constant_pool(&mut self) -> Result<Vec<ConstantPoolEntry>, ClassFileError> {
        let count = self.read_u16()?;
        // index 0 is unused; entries run from 1..count, with Long/Double
        // entries occupying two slots (JVMS 4.4.5).
        let mut pool = Vec::with_capacity(count.saturating_sub(1) as usize);
        let mut i = 1u16;
        while i < count {
            let entry = self.read_constant_pool_entry()?;
            let is_wide = matches!(
                entry,
                ConstantPoolEntry::Long(_) | ConstantPoolEntry::Double(_)
            );
            pool.push(entry);
            i += 1;
            if is_wide {
                pool.push(ConstantPoolEntry::Unusable);
                i += 1;
            }
        }
        Ok(pool)
    }

    fn read_constant_pool_entry(&mut self) -> Result<ConstantPoolEntry, ClassFileError> {
        const CONSTANT_UTF8: u8 = 1;
        const CONSTANT_INTEGER: u8 = 3;
        const CONSTANT_FLOAT: u8 = 4;
        const CONSTANT_LONG: u8 = 5;
        const CONSTANT_DOUBLE: u8 = 6;
        const CONSTANT_CLASS: u8 = 7;
        const CONSTANT_STRING: u8 = 8;
        const CONSTANT_FIELDREF: u8 = 9;
        const CONSTANT_METHODREF: u8 = 10;
        const CONSTANT_INTERFACE_METHODREF: u8 = 11;
        const CONSTANT_NAME_AND_TYPE: u8 = 12;
        const CONSTANT_METHOD_HANDLE: u8 = 15;
        const CONSTANT_METHOD_TYPE: u8 = 16;
        const CONSTANT_DYNAMIC: u8 = 17;
        const CONSTANT_INVOKE_DYNAMIC: u8 = 18;
        const CONSTANT_MODULE: u8 = 19;
        const CONSTANT_PACKAGE: u8 = 20;

        let tag = self.read_u8()?;
        let entry = match tag {
            CONSTANT_UTF8 => {
                let length = self.read_u16()?;
                let data = self.take(length as usize)?;
                let text =
                    String::from_utf8(data.to_vec()).map_err(|_| ClassFileError::InvalidUtf8)?;
                ConstantPoolEntry::Utf8(text)
            }
            CONSTANT_INTEGER => ConstantPoolEntry::Integer(self.read_u32()? as i32),
            CONSTANT_FLOAT => ConstantPoolEntry::Float(self.read_u32()?),
            CONSTANT_LONG => {
                let hi = self.read_u32()? as u64;
                let lo = self.read_u32()? as u64;
                ConstantPoolEntry::Long((hi << 32) | lo)
            }
            CONSTANT_DOUBLE => {
                let hi = self.read_u32()? as u64;
                let lo = self.read_u32()? as u64;
                ConstantPoolEntry::Double((hi << 32) | lo)
            }
            CONSTANT_CLASS | CONSTANT_MODULE | CONSTANT_PACKAGE => ConstantPoolEntry::Class {
                name_index: self.read_u16()?,
            },
            CONSTANT_STRING => ConstantPoolEntry::String {
                string_index: self.read_u16()?,
            },
            CONSTANT_FIELDREF => {
                let class_index = self.read_u16()?;
                let name_and_type_index = self.read_u16()?;
                ConstantPoolEntry::Fieldref {
                    class_index,
                    name_and_type_index,
                }
            }
            CONSTANT_METHODREF => {
                let class_index = self.read_u16()?;
                let name_and_type_index = self.read_u16()?;
                ConstantPoolEntry::Methodref {
                    class_index,
                    name_and_type_index,
                }
            }
            CONSTANT_INTERFACE_METHODREF => {
                let class_index = self.read_u16()?;
                let name_and_type_index = self.read_u16()?;
                ConstantPoolEntry::InterfaceMethodref {
                    class_index,
                    name_and_type_index,
                }
            }
            CONSTANT_NAME_AND_TYPE => {
                let name_index = self.read_u16()?;
                let descriptor_index = self.read_u16()?;
                ConstantPoolEntry::NameAndType {
                    name_index,
                    descriptor_index,
                }
            }
            CONSTANT_METHOD_HANDLE => {
                self.skip(3)?; // reference_kind:u8 + reference_index:u16
                ConstantPoolEntry::Unusable
            }
            CONSTANT_METHOD_TYPE => {
                self.skip(2)?; // descriptor_index:u16
                ConstantPoolEntry::Unusable
            }
            CONSTANT_DYNAMIC | CONSTANT_INVOKE_DYNAMIC => {
                self.skip(4)?; // bootstrap_method_attr_index:u16 + name_and_type_index:u16
                ConstantPoolEntry::Unusable
            }
            other => return Err(ClassFileError::InvalidConstantPoolTag(other)),
        };
        Ok(entry)
    }

    fn utf8_at<'p>(
        &self,
        pool: &'p [ConstantPoolEntry],
        idx: u16,
    ) -> Result<&'p str, ClassFileError> {
        match pool.get(idx.wrapping_sub(1) as usize) {
            Some(ConstantPoolEntry::Utf8(s)) => Ok(s.as_str()),
            _ => Err(ClassFileError::InvalidConstantPoolIndex(idx)),
        }
    }

    /// Skips a `field_info`/`method_info` entry this subset has no use for
    /// (fields aren't modeled; this subset has no field support).
    pub fn skip_field_or_method(&mut self) -> Result<(), ClassFileError> {
        self.skip(6)?; // access_flags + name_index + descriptor_index
        let attributes_count = self.read_u16()?;
        for _ in 0..attributes_count {
            self.skip_attribute()?;
        }
        Ok(())
    }

    fn skip_attribute(&mut self) -> Result<(), ClassFileError> {
        self.skip(2)?; // attribute_name_index
        let length = self.read_u32()?;
        self.skip(length as usize)
    }

    pub fn read_method(&mut self, pool: &[ConstantPoolEntry]) -> Result<Method, ClassFileError> {
        let _access_flags = self.read_u16()?;
        let name_index = self.read_u16()?;
        let descriptor_index = self.read_u16()?;
        let name = self.utf8_at(pool, name_index)?.to_owned();
        let descriptor = self.utf8_at(pool, descriptor_index)?.to_owned();

        let attributes_count = self.read_u16()?;
        let mut code = None;
        for _ in 0..attributes_count {
            let attribute_name_index = self.read_u16()?;
            let length = self.read_u32()?;
            let attribute_name = self.utf8_at(pool, attribute_name_index)?;
            if attribute_name == "Code" {
                code = Some(self.read_code_attribute()?);
            } else {
                self.skip(length as usize)?;
            }
        }

        let code = code.ok_or_else(|| ClassFileError::MissingCodeAttribute {
            method: name.clone(),
        })?;

        Ok(Method {
            name,
            descriptor,
            code,
        })
    }

    fn read_code_attribute(&mut self) -> Result<CodeAttribute, ClassFileError> {
        let max_stack = self.read_u16()?;
        let max_locals = self.read_u16()?;
        let code_length = self.read_u32()?;
        let code = self.take(code_length as usize)?.to_vec();

        let exception_table_length = self.read_u16()?;
        self.skip(exception_table_length as usize * 8)?; // start/end/handler pc + catch_type, all u16

        let attributes_count = self.read_u16()?;
        for _ in 0..attributes_count {
            self.skip_attribute()?;
        }

        Ok(CodeAttribute {
            max_stack,
            max_locals,
            code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::build_minimal_class;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_minimal_class_file() {
        use crate::model::ClassFile;

        let code = vec![0xb1]; // return
        let bytes = build_minimal_class(&code, 1, 1);
        let class = ClassFile::parse(&bytes).unwrap();

        let method = class.find_method("main", "([Ljava/lang/String;)V").unwrap();
        assert_eq!(method.code.max_stack, 1);
        assert_eq!(method.code.max_locals, 1);
        assert_eq!(method.code.code, vec![0xb1]);
    }

    #[test]
    fn rejects_bad_magic() {
        use crate::model::ClassFile;

        let bytes = vec![0, 0, 0, 0];
        assert_eq!(
            ClassFile::parse(&bytes).unwrap_err(),
            ClassFileError::BadMagic
        );
    }

    #[test]
    fn rejects_unsupported_major_version() {
        use crate::model::ClassFile;

        let mut bytes = build_minimal_class(&[0xb1], 1, 1);
        bytes[6..8].copy_from_slice(&999u16.to_be_bytes()); // major version
        assert_eq!(
            ClassFile::parse(&bytes).unwrap_err(),
            ClassFileError::UnsupportedVersion { major: 999 }
        );
    }
}
