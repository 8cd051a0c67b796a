use crate::{
    aggregate::non_blank,
    errors::{RsvpError, RsvpResult},
    models::{
        event::EventType,
        search::{EventFilter, MAX_PAGE_SIZE, Page, SearchParams, TimeRange},
    },
};

impl SearchParams {
    /// Validates raw parameters into a filter and a page.
    ///
    /// Blank strings count as absent. The date range needs both ends, in order.
    pub fn into_filter(self) -> RsvpResult<(EventFilter, Page)> {
        let event_type: EventType = non_blank(self.event_type.as_deref())
            .ok_or_else(|| RsvpError::bad_request("eventType must be set"))?
            .parse()?;

        let time_range = match (self.start_time, self.end_time) {
            (None, None) => None,
            (Some(start), Some(end)) if start < end => Some(TimeRange { start, end }),
            (Some(_), Some(_)) => {
                return Err(RsvpError::bad_request("startTime must be before endTime"));
            }
            _ => {
                return Err(RsvpError::bad_request(
                    "startTime and endTime must be set together",
                ));
            }
        };

        let mut page = Page::default();
        if let Some(number) = self.page_number {
            page.number = number;
        }
        if let Some(size) = self.page_size {
            if size == 0 || size > MAX_PAGE_SIZE {
                return Err(RsvpError::bad_request(format!(
                    "pageSize must be between 1 and {}",
                    MAX_PAGE_SIZE
                )));
            }
            page.size = size;
        }

        let filter = EventFilter {
            event_type,
            title: non_blank(self.title.as_deref()),
            organizer_email: non_blank(self.organizer_email.as_deref()),
            attendee_email: non_blank(self.attendee_email.as_deref()),
            time_range,
        };

        Ok((filter, page))
    }
}
