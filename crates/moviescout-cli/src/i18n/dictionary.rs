//! Built-in translation tables.

use super::TranslationKey;

/// English (United States).
pub const EN_US: &[(TranslationKey, &str)] = &[
    (TranslationKey::SearchBarLang, "Language"),
    (TranslationKey::SearchBarPoweredBy, "Powered by TMDB"),
    (TranslationKey::SearchBarPlaceholder, "Search movies..."),
    (TranslationKey::SearchBarButton, "Search"),
    (TranslationKey::SearchBarTrend, "Trending"),
    (TranslationKey::LoaderText, "Loading movies, please wait..."),
    (
        TranslationKey::ErrorMainText,
        "Whoops, something went wrong! Please try reloading this page!",
    ),
    (
        TranslationKey::ToastBadRequest,
        "No movies found for your request.",
    ),
    (
        TranslationKey::ToastNoRequest,
        "Please enter your search query.",
    ),
    (TranslationKey::Genres, "Genres"),
    (TranslationKey::ReleaseDate, "Release date"),
    (TranslationKey::OriginalLanguage, "Original language"),
    (TranslationKey::Budget, "Budget"),
    (TranslationKey::Revenue, "Revenue"),
    (TranslationKey::Rating, "Rating"),
    (TranslationKey::Popularity, "Popularity"),
    (TranslationKey::Votes, "Votes"),
    (TranslationKey::Production, "Production"),
    (TranslationKey::NotDescribed, "No description available."),
    (TranslationKey::NoBudget, "Budget unknown"),
    (TranslationKey::NoRevenue, "Revenue unknown"),
    (TranslationKey::PagiNext, "Next"),
    (TranslationKey::PagiPrev, "Prev"),
    (
        TranslationKey::YupMinQuery,
        "Query must be at least 1 character",
    ),
];

/// Ukrainian.
pub const UK_UA: &[(TranslationKey, &str)] = &[
    (TranslationKey::SearchBarLang, "Мова"),
    (TranslationKey::SearchBarPoweredBy, "Дані надає TMDB"),
    (TranslationKey::SearchBarPlaceholder, "Пошук фільмів..."),
    (TranslationKey::SearchBarButton, "Пошук"),
    (TranslationKey::SearchBarTrend, "У тренді"),
    (TranslationKey::LoaderText, "Завантажуємо фільми, зачекайте..."),
    (
        TranslationKey::ErrorMainText,
        "Ой, щось пішло не так! Спробуйте перезавантажити сторінку!",
    ),
    (
        TranslationKey::ToastBadRequest,
        "За вашим запитом фільмів не знайдено.",
    ),
    (
        TranslationKey::ToastNoRequest,
        "Будь ласка, введіть пошуковий запит.",
    ),
    (TranslationKey::Genres, "Жанри"),
    (TranslationKey::ReleaseDate, "Дата виходу"),
    (TranslationKey::OriginalLanguage, "Мова оригіналу"),
    (TranslationKey::Budget, "Бюджет"),
    (TranslationKey::Revenue, "Збори"),
    (TranslationKey::Rating, "Рейтинг"),
    (TranslationKey::Popularity, "Популярність"),
    (TranslationKey::Votes, "Голоси"),
    (TranslationKey::Production, "Виробництво"),
    (TranslationKey::NotDescribed, "Опис відсутній."),
    (TranslationKey::NoBudget, "Бюджет невідомий"),
    (TranslationKey::NoRevenue, "Збори невідомі"),
    (TranslationKey::PagiNext, "Далі"),
    (TranslationKey::PagiPrev, "Назад"),
    (
        TranslationKey::YupMinQuery,
        "Запит має містити щонайменше 1 символ",
    ),
];
