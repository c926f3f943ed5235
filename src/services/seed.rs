//! One-time sample data seeding.
//!
//! The catalog exposes no create endpoint; records enter the store only
//! through this service. Seeding is idempotent: a store that already holds
//! any records is left untouched.

use crate::models::{Prompt, PromptFilter};
use crate::storage::PromptStore;
use crate::Result;
use std::sync::Arc;

/// Seeds the store with the bundled sample catalog when it is empty.
pub struct SeedService {
    store: Arc<dyn PromptStore>,
}

impl SeedService {
    /// Creates a seed service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn PromptStore>) -> Self {
        Self { store }
    }

    /// Inserts the sample catalog if the store holds no records.
    ///
    /// # Returns
    ///
    /// The number of records inserted: zero when the store already had data.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial count or any insert fails.
    pub fn seed_if_empty(&self) -> Result<usize> {
        let existing = self.store.count(&PromptFilter::All)?;
        if existing > 0 {
            tracing::info!(existing, "Store already has data, skipping seed");
            return Ok(0);
        }

        let prompts = sample_prompts();
        for prompt in &prompts {
            self.store.insert(prompt)?;
        }

        tracing::info!(inserted = prompts.len(), "Seeded sample catalog");
        Ok(prompts.len())
    }
}

/// The bundled sample catalog.
///
/// Identifiers are minted fresh and timestamps are taken at call time; the
/// record contents are fixed.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn sample_prompts() -> Vec<Prompt> {
    vec![
        Prompt::new(
            "专业文案创作大师",
            "你是一位资深的文案创作专家，擅长撰写各种类型的营销文案。请根据以下要求创作一份吸引人的文案：\n\n\
             产品/服务：[在此输入产品或服务名称]\n\
             目标受众：[描述目标客户群体]\n\
             核心卖点：[列出主要优势]\n\n\
             要求：\n\
             1. 标题要有冲击力，能够立即抓住注意力\n\
             2. 内容要突出产品价值和用户利益\n\
             3. 语言要生动有趣，避免枯燥的描述\n\
             4. 结尾要有明确的行动号召",
        )
        .with_description("帮助您创作引人入胜的营销文案，提升品牌影响力和转化率。")
        .with_category("文案写作")
        .with_type("营销文案")
        .with_tags(vec![
            "营销".to_string(),
            "创意".to_string(),
            "转化".to_string(),
            "新手友好".to_string(),
        ])
        .with_usage("适用于各种营销场景，包括产品介绍、广告文案、社交媒体内容等。")
        .with_engagement(1200, 89, 4.8)
        .with_views(5600),
        Prompt::new(
            "AI图像生成大师",
            "Create a stunning digital artwork featuring [主题描述], in the style of [艺术风格], \
             with [色彩方案] color palette. The composition should be [构图描述], with dramatic \
             lighting and intricate details. High resolution, professional quality, trending on \
             ArtStation.\n\n\
             参数建议：\n\
             - 分辨率：1024x1024\n\
             - 采样步数：50\n\
             - CFG Scale：7-12",
        )
        .with_description("专业的AI艺术创作提示词，帮您生成高质量的艺术作品和设计素材。")
        .with_category("图像生成")
        .with_type("艺术创作")
        .with_tags(vec![
            "AI绘画".to_string(),
            "艺术".to_string(),
            "设计".to_string(),
            "专业".to_string(),
        ])
        .with_preview_images(vec![
            "https://picsum.photos/300/300?random=1".to_string(),
            "https://picsum.photos/300/300?random=2".to_string(),
        ])
        .with_usage("适用于Midjourney、Stable Diffusion、DALL-E等AI绘画工具。")
        .with_engagement(2100, 156, 4.9)
        .with_views(8900),
        Prompt::new(
            "代码优化专家",
            "作为一位经验丰富的软件工程师，请帮我分析以下代码并提供优化建议：\n\n\
             [在此粘贴您的代码]\n\n\
             请从以下几个方面进行分析：\n\
             1. 代码可读性和结构\n\
             2. 性能优化机会\n\
             3. 潜在的bug和安全问题\n\
             4. 最佳实践建议\n\
             5. 重构建议（如果需要）\n\n\
             请提供具体的改进代码示例。",
        )
        .with_description("智能代码审查和优化建议，提升代码质量和性能。")
        .with_category("代码编程")
        .with_type("代码审查")
        .with_tags(vec![
            "编程".to_string(),
            "代码审查".to_string(),
            "优化".to_string(),
            "最佳实践".to_string(),
        ])
        .with_usage("适用于各种编程语言的代码审查和优化场景。")
        .with_engagement(856, 67, 4.7)
        .with_views(3400),
        Prompt::new(
            "市场分析顾问",
            "你是一位资深的商业分析师，请对以下市场进行深度分析：\n\n\
             行业/市场：[输入目标行业]\n\
             地区：[输入目标地区]\n\
             时间范围：[分析时间段]\n\n\
             请提供：\n\
             1. 市场规模和增长趋势\n\
             2. 主要竞争对手分析\n\
             3. 目标客户画像\n\
             4. 市场机会和威胁\n\
             5. 进入策略建议\n\
             6. 风险评估和应对措施",
        )
        .with_description("深度市场分析和商业策略制定，助力企业决策。")
        .with_category("商业营销")
        .with_type("市场分析")
        .with_tags(vec![
            "市场分析".to_string(),
            "商业策略".to_string(),
            "咨询".to_string(),
            "决策支持".to_string(),
        ])
        .with_usage("适用于企业市场调研、投资决策、商业计划制定等场景。")
        .with_engagement(743, 45, 4.6)
        .with_views(2800),
        Prompt::new(
            "个性化学习导师",
            "作为一位经验丰富的教育专家，请为学习者制定个性化学习计划：\n\n\
             学习目标：[具体学习目标]\n\
             当前水平：[现有知识基础]\n\
             可用时间：[每日/每周学习时间]\n\
             学习偏好：[学习方式偏好]\n\n\
             请提供：\n\
             1. 详细的学习路径规划\n\
             2. 阶段性学习目标\n\
             3. 推荐的学习资源\n\
             4. 学习方法和技巧\n\
             5. 进度评估标准\n\
             6. 激励和坚持策略",
        )
        .with_description("根据学习者特点制定个性化学习计划，提升学习效率。")
        .with_category("学习教育")
        .with_type("学习规划")
        .with_tags(vec![
            "教育".to_string(),
            "学习计划".to_string(),
            "个性化".to_string(),
            "效率提升".to_string(),
        ])
        .with_usage("适用于各种学科和技能的学习规划，包括语言学习、职业技能提升等。")
        .with_engagement(1500, 123, 4.8)
        .with_views(6200),
        Prompt::new(
            "专业摄影师",
            "Professional photography of [拍摄主题], shot with [相机型号], [镜头规格], in \
             [拍摄环境].\n\n\
             技术参数：\n\
             - 光圈：f/[数值]\n\
             - 快门：1/[数值]s\n\
             - ISO：[数值]\n\
             - 焦距：[数值]mm\n\n\
             构图要求：[构图描述]\n\
             光线条件：[光线描述]\n\
             后期风格：[后期处理风格]\n\n\
             High resolution, sharp focus, professional lighting, award-winning photography.",
        )
        .with_description("专业摄影构图和后期处理指导，提升摄影作品质量。")
        .with_category("创意设计")
        .with_type("摄影指导")
        .with_tags(vec![
            "摄影".to_string(),
            "构图".to_string(),
            "后期".to_string(),
            "专业技巧".to_string(),
        ])
        .with_preview_images(vec![
            "https://picsum.photos/300/300?random=3".to_string(),
            "https://picsum.photos/300/300?random=4".to_string(),
            "https://picsum.photos/300/300?random=5".to_string(),
        ])
        .with_usage("适用于各种摄影场景，包括人像、风景、产品摄影等。")
        .with_engagement(967, 78, 4.7)
        .with_views(4100),
        Prompt::new(
            "Logo设计专家",
            "Design a modern, minimalist logo for [公司/品牌名称], a [行业类型] company.\n\n\
             设计要求：\n\
             - 风格：[现代/经典/创意等]\n\
             - 颜色：[主色调偏好]\n\
             - 元素：[希望包含的设计元素]\n\
             - 应用场景：[使用场合]\n\n\
             The logo should be:\n\
             - Scalable and readable at any size\n\
             - Memorable and distinctive\n\
             - Appropriate for digital and print media\n\
             - Timeless design that won't quickly become outdated\n\n\
             Vector format, clean lines, professional appearance.",
        )
        .with_description("专业品牌标识设计，打造独特的视觉识别系统。")
        .with_category("创意设计")
        .with_type("Logo设计")
        .with_tags(vec![
            "Logo设计".to_string(),
            "品牌".to_string(),
            "视觉设计".to_string(),
            "企业形象".to_string(),
        ])
        .with_preview_images(vec![
            "https://picsum.photos/300/300?random=6".to_string(),
            "https://picsum.photos/300/300?random=7".to_string(),
        ])
        .with_usage("适用于企业品牌设计、个人品牌建设、产品标识设计等。")
        .with_engagement(1300, 92, 4.9)
        .with_views(5500),
        Prompt::new(
            "数据科学家",
            "作为一位资深数据科学家，请帮我分析以下数据问题：\n\n\
             数据集描述：[数据集基本信息]\n\
             业务目标：[要解决的业务问题]\n\
             数据规模：[数据量和维度]\n\n\
             请提供：\n\
             1. 数据探索和清洗策略\n\
             2. 特征工程建议\n\
             3. 适合的机器学习算法\n\
             4. 模型评估指标\n\
             5. 结果解释和业务建议\n\
             6. 可视化展示方案\n\n\
             请包含具体的Python代码示例。",
        )
        .with_description("专业数据分析和机器学习模型构建指导。")
        .with_category("数据分析")
        .with_type("机器学习")
        .with_tags(vec![
            "数据科学".to_string(),
            "机器学习".to_string(),
            "Python".to_string(),
            "算法".to_string(),
        ])
        .with_usage("适用于数据分析项目、机器学习模型开发、业务数据洞察等场景。")
        .with_engagement(654, 34, 4.5)
        .with_views(2900),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryPromptStore;

    #[test]
    fn test_sample_catalog_shape() {
        let prompts = sample_prompts();
        assert_eq!(prompts.len(), 8);
        assert!(prompts.iter().all(|p| p.category.is_some()));
        assert!(prompts.iter().all(|p| !p.content.is_empty()));
    }

    #[test]
    fn test_seed_fills_empty_store() {
        let store = Arc::new(MemoryPromptStore::new());
        let seeder = SeedService::new(Arc::clone(&store) as Arc<dyn PromptStore>);

        let inserted = seeder.seed_if_empty().unwrap();
        assert_eq!(inserted, 8);
        assert_eq!(store.count(&PromptFilter::All).unwrap(), 8);
    }

    #[test]
    fn test_seed_is_idempotent() {
        let store = Arc::new(MemoryPromptStore::new());
        let seeder = SeedService::new(Arc::clone(&store) as Arc<dyn PromptStore>);

        seeder.seed_if_empty().unwrap();
        let second = seeder.seed_if_empty().unwrap();
        assert_eq!(second, 0);
        assert_eq!(store.count(&PromptFilter::All).unwrap(), 8);
    }

    #[test]
    fn test_seed_does_not_touch_populated_store() {
        let store = Arc::new(MemoryPromptStore::new());
        store.insert(&Prompt::new("existing", "content")).unwrap();
        let seeder = SeedService::new(Arc::clone(&store) as Arc<dyn PromptStore>);

        assert_eq!(seeder.seed_if_empty().unwrap(), 0);
        assert_eq!(store.count(&PromptFilter::All).unwrap(), 1);
    }

    #[test]
    fn test_seed_categories_cover_the_sample_set() {
        let store = Arc::new(MemoryPromptStore::new());
        SeedService::new(Arc::clone(&store) as Arc<dyn PromptStore>)
            .seed_if_empty()
            .unwrap();

        let categories = store.distinct_categories().unwrap();
        // 创意设计 appears twice in the sample set and must dedupe.
        assert_eq!(categories.len(), 7);
        assert!(categories.contains(&"创意设计".to_string()));
    }
}
