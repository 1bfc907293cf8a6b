//! Fixed reply texts. Users read these verbatim, so tests compare against
//! the constants rather than re-typing the strings.

pub const WELCOME: &str = "Здравствуйте! Данный телеграм-бот позволяет предсказывать \
метеорологическую дальность видимости (МДВ), основываясь на других погодных характеристиках.

Чтобы предсказать МДВ, заполните приведённый ниже шаблон example.csv.

Для получения справки о значении столбцов используйте команду '/help'.";

/// Sent right after the example file.
pub const EXAMPLE_CAPTION: &str = "⬆️ Используйте вот этот пример ⬆️";

pub const HELP: &str = "Ниже приведены описания всех используемых в файле столбцов:
  T - Температура воздуха (градусы Цельсия)
  Po - Атмосферное давление (мм. рт. ст.)
  U - Относительная влажность воздуха (%)
  DD - Направление ветра (азимут)
  Ff - Скорость ветра на высоте 10 м
  Td - Температура точки росы (градусы Цельсия)
  clear - Ясная погода (1 - да, 0 - нет)
  fog - Туман (1 - да, 0 - нет)
  smoke - Дым (1 - да, 0 - нет)
  haze - Дымка (1 - да, 0 - нет)
  mist - Мгла (1 - да, 0 - нет)
  cover_dust - Обложная пыль (1 - да, 0 - нет)
  sand - Песок в воздухе (1 - да, 0 - нет)
  dust_storm - Песчаная буря (1 - да, 0 - нет)
  blizzard_storm - Метель/буря (1 - да, 0 - нет)
  drifting_snow - Поземок (1 - да, 0 - нет)
  tornado - Торнадо/смерчи (1 - да, 0 - нет)
  squall - Шквалы (1 - да, 0 - нет)
  snow_grains - Снежные зёрна (1 - да, 0 - нет)
  ice_grains - Ледяная крупа (1 - да, 0 - нет)
  diamond_dust - Алмазная пыль (1 - да, 0 - нет)
  snow - Снег (1 - да, 0 - нет)
  hail - Град (1 - да, 0 - нет)
  rain - Дождь (1 - да, 0 - нет)
  shower - Ливень (1 - да, 0 - нет)
  drizzle - Морось (1 - да, 0 - нет)
  thunderstorm - Гроза (1 - да, 0 - нет)
  partial - Частичный(ая) (1 - да, 0 - нет)
  weak - Слабый(ая) (1 - да, 0 - нет)
  small - Небольшой(ая) (1 - да, 0 - нет)
  shreds - Клочьями (1 - да, 0 - нет)
  lower - Низовой(ая) (1 - да, 0 - нет)
  ground - Поземный(ая) (1 - да, 0 - нет)
  freezing - Замерзающий(ая) (1 - да, 0 - нет)
  strong - Сильный(ая) (1 - да, 0 - нет)
  near - Вблизи (1 - да, 0 - нет)";

pub const NO_ATTACHMENT: &str =
    "Пожалуйста, прикрепите корректный CSV файл, ориентируясь на приведённый выше пример example.csv.";

pub const PARSE_FAILURE: &str = "Ошибка: не получилось обработать файл. Пожалуйста, прикрепите \
корректный CSV файл, ориентируясь на приведённый выше пример example.csv.";

pub const ZERO_RECORDS: &str = "Ошибка: прикреплённый файл содержит 0 записей.";

pub const PREDICTION_FAILURE: &str = "Ошибка: не получилось выполнить предсказание. Проверьте, \
что названия столбцов и значения в файле совпадают с примером example.csv (подробнее: /help).";

/// Single-prediction reply prefix.
pub const SINGLE_PREFIX: &str = "Предсказанная дальность видимости:";

/// First line of the enumerated reply.
pub const MULTI_HEADER: &str = "Предсказанные дальности видимости:";

pub const UNIT: &str = "км";

/// Bot API ceiling on one text message.
pub const MAX_MESSAGE_CHARS: usize = 4096;

pub const FETCH_FAILURE: &str = "Ошибка: не удалось загрузить прикреплённый файл. \
Пожалуйста, попробуйте отправить его ещё раз.";

/// Input columns documented by `HELP`, in template order.
pub const COLUMNS: [&str; 36] = [
    "T", "Po", "U", "DD", "Ff", "Td",
    "clear", "fog", "smoke", "haze", "mist", "cover_dust", "sand", "dust_storm",
    "blizzard_storm", "drifting_snow", "tornado", "squall", "snow_grains", "ice_grains",
    "diamond_dust", "snow", "hail", "rain", "shower", "drizzle", "thunderstorm",
    "partial", "weak", "small", "shreds", "lower", "ground", "freezing", "strong", "near",
];
