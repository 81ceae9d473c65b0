/// 缓存项
///
/// 每次 `get` 都会新建一个缓存项。未设置值即表示未命中，
/// 读取值之前应先检查 [`CacheItem::has_value`]。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheItem {
    key: String,
    value: Option<Vec<u8>>,
}

impl CacheItem {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    pub fn with_value(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }

    /// 以 UTF-8 文本读取值，非法 UTF-8 返回 `None`
    pub fn value_str(&self) -> Option<&str> {
        self.value().and_then(|v| std::str::from_utf8(v).ok())
    }

    pub fn set_value(&mut self, value: impl Into<Vec<u8>>) {
        self.value = Some(value.into());
    }

    pub fn into_value(self) -> Option<Vec<u8>> {
        self.value
    }
}
