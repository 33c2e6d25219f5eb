use aj_core::{Article, GeneratedArticle, Result, TextGenerator, TrendSignal};
use async_trait::async_trait;
use std::fmt;

/// Deterministic templated article for a topic. Pure string interpolation:
/// the same topic always yields the same article, and it cannot fail. This
/// is the publishable fallback the pipeline uses when the hosted model is
/// unavailable, not an error placeholder.
pub fn template_article(topic: &str, category: &str) -> GeneratedArticle {
    let topic_lower = topic.to_lowercase();
    GeneratedArticle {
        title: format!("{}: Sohadagi so'nggi yangiliklar", topic),
        summary: format!(
            "{} sohasida so'nggi paytlarda katta o'zgarishlar kuzatilmoqda. \
             Mutaxassislarning fikricha, bu tendensiya yaqin kelajakda ham davom etadi.",
            topic
        ),
        content: format!(
            "{} bugungi kunda eng muhim mavzulardan biri hisoblanadi. Texnologiyaning \
             rivojlanishi va innovatsion yechimlarning paydo bo'lishi bu sohada yangi \
             imkoniyatlar yaratmoqda.\n\n\
             Ekspertlarning fikriga ko'ra, {} sohasida quyidagi asosiy tendensiyalar \
             kuzatilmoqda:\n\n\
             • Texnologik yechimlarning takomillashishi\n\
             • Bozor talablarining o'zgarishi\n\
             • Yangi imkoniyatlarning paydo bo'lishi\n\
             • International hamkorlikning kengayishi\n\n\
             O'zbekistonda ham bu sohaga alohida e'tibor berilmoqda. Davlat va xususiy \
             sektor vakillari birgalikda ishlayotgan loyihalar bu yo'nalishdagi \
             rivojlanishni yanada tezlashtirmoqda.\n\n\
             Kelajakda {} sohasida yanada katta yutuqlarga erishish kutilmoqda. Bu esa \
             iqtisodiyot va jamiyat rivojiga ijobiy ta'sir ko'rsatadi.",
            topic, topic_lower, topic_lower
        ),
        category: category.to_string(),
        tags: vec![
            topic_lower,
            "yangilik".to_string(),
            "tendensiya".to_string(),
            "rivojlanish".to_string(),
        ],
    }
}

/// Offline generator used in tests and no-network deployments.
pub struct TemplateModel;

impl fmt::Debug for TemplateModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateModel").finish()
    }
}

#[async_trait]
impl TextGenerator for TemplateModel {
    fn name(&self) -> &str {
        "Template"
    }

    async fn generate_article(&self, topic: &str, category: &str) -> Result<GeneratedArticle> {
        Ok(template_article(topic, category))
    }

    async fn analyze_trends(&self, _articles: &[Article]) -> Result<Vec<TrendSignal>> {
        Ok(Vec::new())
    }
}
