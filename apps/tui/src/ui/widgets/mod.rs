pub mod cctv;
pub mod kpi;
pub mod map;
pub mod popup;
pub mod radar;
pub mod report;
pub mod suspect;
pub mod threat;
pub mod timeline;
