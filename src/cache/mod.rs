//! 对象缓存层
//!
//! 通过 ctor 在启动时注册缓存后端构造器，运行时按配置选择。
//! 默认提供 Moka（进程内）和 Redis 两种实现。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个缓存后端插件
///
/// 在模块加载时（ctor）把构造器写入全局注册表，
/// 构造器本身是异步的，失败时返回 CacheConnection 错误。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $plugin:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_ $plugin:snake>]() {
                use std::sync::Arc;

                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    Arc::new(|| {
                        Box::pin(async {
                            let cache = $plugin::new().map_err(|e| {
                                $crate::errors::GradelinkError::cache_connection(e)
                            })?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        })
                            as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
