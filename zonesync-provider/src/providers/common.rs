//! Provider 公共工具函数

// ============ 域名名称处理 ============

/// 补全域名末尾的点
/// 如: "example.com" -> "example.com."
/// 如: "example.com." -> "example.com."
pub(crate) fn ensure_fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

/// 将 host 和 port 拼接为 endpoint
/// IPv6 地址需要加方括号: "::1" + 53 -> "[::1]:53"
pub(crate) fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}
