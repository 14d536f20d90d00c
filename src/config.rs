//! 全局配置管理,存储所有可配置项

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 检测类正则的长度上限（仅作用于规则的 url_fragment，宽松）
    pub detection_pattern_max_len: usize,
    // 匹配器正则的长度上限（title_matcher / url_matcher，面向模板字段，从严）
    pub matcher_pattern_max_len: usize,
    // 匹配器全局扫描的最大迭代次数（防止零宽匹配导致的死循环）
    pub matcher_max_iterations: usize,
    // 是否启用详细日志
    pub verbose: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            detection_pattern_max_len: 1000,
            matcher_pattern_max_len: 200,
            matcher_max_iterations: 100,
            verbose: false,
        }
    }
}

/// 配置管理器（单例）
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn detection_pattern_max_len(mut self, max_len: usize) -> Self {
        self.config.detection_pattern_max_len = max_len;
        self
    }

    pub fn matcher_pattern_max_len(mut self, max_len: usize) -> Self {
        self.config.matcher_pattern_max_len = max_len;
        self
    }

    pub fn matcher_max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.matcher_max_iterations = max_iterations;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}

impl Default for CustomConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
