//! Landing Page Content
//!
//! Static copy for the services grid, FAQ and about sections.

pub struct Service {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub features: [&'static str; 3],
}

pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

pub struct Pillar {
    pub icon: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

pub struct FooterColumn {
    pub title: &'static str,
    pub links: [&'static str; 4],
}

/// Navigation bar entries and the section ids they scroll to
pub static NAV_LINKS: [(&str, &str); 4] = [
    ("Главная", "hero"),
    ("Услуги", "services"),
    ("FAQ", "faq"),
    ("О банке", "about"),
];

pub static STATS: [Stat; 4] = [
    Stat { value: "2.5М+", label: "Клиентов" },
    Stat { value: "150+", label: "Отделений" },
    Stat { value: "24/7", label: "Поддержка" },
    Stat { value: "98%", label: "Довольных клиентов" },
];

pub static SERVICES: [Service; 6] = [
    Service {
        icon: "💳",
        title: "Дебетовые карты",
        description: "Карты с кэшбэком до 10% и бесплатным обслуживанием",
        features: ["Кэшбэк до 10%", "Без комиссий", "Apple Pay / Google Pay"],
    },
    Service {
        icon: "🏦",
        title: "Кредитные карты",
        description: "Льготный период до 120 дней без процентов",
        features: ["120 дней без %", "Лимит до 1 млн ₽", "Онлайн-одобрение"],
    },
    Service {
        icon: "🐷",
        title: "Вклады",
        description: "Ставки до 18% годовых с возможностью пополнения",
        features: ["До 18% годовых", "Пополняемые", "Застрахованы"],
    },
    Service {
        icon: "🏠",
        title: "Ипотека",
        description: "Ставка от 5.9% на новостройки и вторичное жилье",
        features: ["От 5.9% годовых", "Одобрение за 1 день", "До 30 лет"],
    },
    Service {
        icon: "📱",
        title: "Мобильный банк",
        description: "Все операции в одном приложении",
        features: ["Переводы 24/7", "Оплата услуг", "Контроль расходов"],
    },
    Service {
        icon: "🛡",
        title: "Страхование",
        description: "Защита здоровья, имущества и путешествий",
        features: ["Онлайн-оформление", "Быстрые выплаты", "Круглосуточная поддержка"],
    },
];

pub static FAQS: [Faq; 5] = [
    Faq {
        question: "Как открыть счёт в BRILL?",
        answer: "Откройте счёт онлайн за 5 минут через наше мобильное приложение или сайт. \
                 Понадобится только паспорт и СНИЛС. Курьер доставит карту бесплатно в удобное время.",
    },
    Faq {
        question: "Какие комиссии за обслуживание?",
        answer: "Базовое обслуживание бесплатно. Переводы внутри банка — 0₽, на карты других \
                 банков до 100 000₽ в месяц — без комиссии. Снятие наличных в банкоматах BRILL — бесплатно.",
    },
    Faq {
        question: "Как получить кредитную карту?",
        answer: "Заполните заявку онлайн, решение за 1 минуту. Одобренную карту доставим курьером \
                 или заберите в отделении. Льготный период — до 120 дней.",
    },
    Faq {
        question: "Защищены ли мои деньги?",
        answer: "Да, все вклады застрахованы АСВ до 1.4 млн рублей. Используем двухфакторную \
                 аутентификацию и 3D Secure для безопасности платежей.",
    },
    Faq {
        question: "Как связаться со службой поддержки?",
        answer: "Мы на связи 24/7: телефон 8-800-100-BRILL, чат в приложении, онлайн-консультант \
                 на сайте или пишите в соцсети. Среднее время ответа — 30 секунд.",
    },
];

pub static PILLARS: [Pillar; 3] = [
    Pillar {
        icon: "🎯",
        title: "Наша миссия",
        text: "Сделать банковские услуги доступными, понятными и удобными для каждого. \
               Мы верим в прозрачность, инновации и заботу о клиентах.",
    },
    Pillar {
        icon: "💎",
        title: "Наши ценности",
        text: "Честность, надёжность и инновации — основа нашей работы. \
               Мы постоянно развиваемся, чтобы предложить вам лучший сервис.",
    },
    Pillar {
        icon: "👥",
        title: "Наша команда",
        text: "Более 5000 профессионалов работают над тем, чтобы ваш опыт с BRILL был безупречным. \
               Мы всегда рядом, когда вам нужна помощь.",
    },
];

pub static WHY_BRILL: [&str; 5] = [
    "Мгновенные переводы 24/7",
    "Максимальная безопасность данных",
    "Выгодные условия и кэшбэк",
    "Поддержка без выходных",
    "Удобное мобильное приложение",
];

pub static FOOTER_COLUMNS: [FooterColumn; 3] = [
    FooterColumn {
        title: "Продукты",
        links: ["Карты", "Вклады", "Кредиты", "Ипотека"],
    },
    FooterColumn {
        title: "Компания",
        links: ["О нас", "Карьера", "Пресс-центр", "Контакты"],
    },
    FooterColumn {
        title: "Поддержка",
        links: ["Помощь", "8-800-100-BRILL", "Чат поддержки", "FAQ"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_targets_are_section_ids() {
        let sections = ["hero", "services", "faq", "about"];
        for (label, id) in NAV_LINKS {
            assert!(sections.contains(&id), "{label}");
        }
    }

    #[test]
    fn test_faq_entries_complete() {
        for faq in &FAQS {
            assert!(faq.question.ends_with('?'));
            assert!(!faq.answer.is_empty());
            assert!(!faq.answer.contains("  "), "{}", faq.question);
        }
    }

    #[test]
    fn test_services_have_features() {
        for service in &SERVICES {
            assert!(service.features.iter().all(|f| !f.is_empty()), "{}", service.title);
        }
    }
}
