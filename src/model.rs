mod content;
mod de;
mod product;
mod record;
mod setting;

pub use self::content::ContentSection;
pub use self::product::{ProductCard, ProductStatus};
pub use self::record::Record;
pub use self::setting::{SettingType, SiteSetting, decode_flag, encode_flag};
